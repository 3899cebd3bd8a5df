use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load query catalog")]
    LoadError(#[from] config::ConfigError),
}
