// shared helpers

pub mod files;
pub mod paths;
