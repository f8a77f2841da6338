// request handlers

pub mod assets;
pub mod browse;
