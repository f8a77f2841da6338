// configuration module public api

pub mod loading;
pub mod types;

pub use loading::{load_config_from_file, load_configuration, validate_configuration};
pub use types::*;
