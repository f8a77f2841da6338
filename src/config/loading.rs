// configuration loading and merging logic

use anyhow::{Context, Result};
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use std::path::Path;
use tracing::{debug, info};

use super::types::{AppConfig, Cli, ServerOverrides};

/// load and merge configuration from multiple sources
/// precedence: defaults < config file < cli arguments and environment
pub fn load_configuration(cli: &Cli) -> Result<AppConfig> {
    debug!("loading configuration with cli args: {:?}", cli);

    // start with default configuration
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

    // merge config file if provided
    if let Some(config_path) = &cli.config_file {
        if config_path.exists() {
            info!("loading config file: {}", config_path.display());
            figment = figment.merge(Toml::file(config_path));
        } else {
            anyhow::bail!("config file not found: {}", config_path.display());
        }
    }

    // merge cli overrides - highest precedence
    figment = figment.merge(Serialized::defaults(ServerOverrides::from(cli)).key("server"));

    // extract final configuration
    let config: AppConfig = figment.extract().context("failed to parse configuration")?;

    validate_configuration(&config)?;

    debug!("final configuration: {:?}", config);
    Ok(config)
}

/// load configuration from a toml file on top of the defaults, without cli overrides
pub fn load_config_from_file(config_path: &Path) -> Result<AppConfig> {
    let figment = Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(config_path));

    figment
        .extract()
        .context("failed to parse configuration file")
}

/// validate configuration before the server starts
pub fn validate_configuration(config: &AppConfig) -> Result<()> {
    let media_dir = config.media_dir();

    if !media_dir.exists() {
        anyhow::bail!("media directory does not exist: {}", media_dir.display());
    }

    if !media_dir.is_dir() {
        anyhow::bail!("media directory is not a directory: {}", media_dir.display());
    }

    if config.server.port == 0 {
        anyhow::bail!("port cannot be 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli_for(media_dir: &Path) -> Cli {
        Cli {
            media_dir: Some(media_dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_configuration() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_configuration(&cli_for(temp_dir.path())).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.media_dir, temp_dir.path());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mserve.toml");

        fs::write(
            &config_path,
            r#"
[server]
host = "192.168.1.1"
port = 9000
"#,
        )
        .unwrap();

        let cli = Cli {
            port: Some(8080),
            config_file: Some(config_path),
            ..cli_for(temp_dir.path())
        };

        let config = load_configuration(&cli).unwrap();

        assert_eq!(config.server.host, "192.168.1.1"); // from config file
        assert_eq!(config.server.port, 8080); // cli override
    }

    #[test]
    fn test_media_dir_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let media_dir = temp_dir.path().join("videos");
        fs::create_dir(&media_dir).unwrap();
        let config_path = temp_dir.path().join("mserve.toml");

        fs::write(
            &config_path,
            format!("[server]\nmedia_dir = {:?}\n", media_dir.display().to_string()),
        )
        .unwrap();

        let cli = Cli {
            config_file: Some(config_path),
            ..Default::default()
        };

        let config = load_configuration(&cli).unwrap();
        assert_eq!(config.server.media_dir, media_dir);
    }

    #[test]
    fn test_missing_media_dir_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_configuration(&cli_for(&temp_dir.path().join("missing")));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("media directory does not exist"));
    }

    #[test]
    fn test_missing_config_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let cli = Cli {
            config_file: Some(temp_dir.path().join("nope.toml")),
            ..cli_for(temp_dir.path())
        };

        assert!(load_configuration(&cli).is_err());
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let cli = Cli {
            port: Some(0),
            ..cli_for(temp_dir.path())
        };

        assert!(load_configuration(&cli).is_err());
    }
}
