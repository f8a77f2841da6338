// configuration type definitions

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// command line interface definition
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mserve", version = env!("CARGO_PKG_VERSION"))]
#[command(about = "a zero-configuration personal media server")]
pub struct Cli {
    /// media directory to serve (defaults to ~/Movies)
    #[arg(short = 'm', long, env = "MSERVE_MEDIA_DIR")]
    pub media_dir: Option<PathBuf>,

    /// host to listen on
    #[arg(short = 'l', long)]
    pub host: Option<String>,

    /// port to listen on
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// config file to use
    #[arg(short = 'c', long)]
    pub config_file: Option<PathBuf>,

    /// increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

/// complete application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
}

/// server configuration section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub media_dir: PathBuf,
}

/// server values that were explicitly supplied on the command line or environment
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_dir: Option<PathBuf>,
}

impl AppConfig {
    /// the configured media root
    pub fn media_dir(&self) -> &PathBuf {
        &self.server.media_dir
    }

    /// listen address used when a request carries no host header
    pub fn listen_authority(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            media_dir: default_media_dir(),
        }
    }
}

/// ~/Movies, or the working directory when HOME is unset
pub fn default_media_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Movies"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl From<&Cli> for ServerOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            host: cli.host.clone(),
            port: cli.port,
            media_dir: cli.media_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "mserve",
            "--media-dir",
            "/srv/media",
            "-l",
            "127.0.0.1",
            "-p",
            "9000",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.media_dir, Some(PathBuf::from("/srv/media")));
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.verbose, 2);

        let overrides = ServerOverrides::from(&cli);
        assert_eq!(overrides.media_dir, Some(PathBuf::from("/srv/media")));
    }

    #[test]
    fn test_unset_flags_stay_unset() {
        let cli = Cli::try_parse_from(["mserve", "-m", "/srv/media"]).unwrap();
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
        assert!(Cli::try_parse_from(["mserve", "--port", "not-a-port"]).is_err());
    }

    #[test]
    fn test_media_dir_reads_environment_override() {
        let command = Cli::command();
        let media_dir = command
            .get_arguments()
            .find(|arg| arg.get_id() == "media_dir")
            .unwrap();

        assert_eq!(
            media_dir.get_env().and_then(|env| env.to_str()),
            Some("MSERVE_MEDIA_DIR")
        );
    }

    #[test]
    fn test_default_media_dir_is_movies_under_home() {
        match std::env::var_os("HOME") {
            Some(home) => assert_eq!(default_media_dir(), PathBuf::from(home).join("Movies")),
            None => assert_eq!(default_media_dir(), PathBuf::from(".")),
        }
        assert_eq!(ServerConfig::default().media_dir, default_media_dir());
    }
}
