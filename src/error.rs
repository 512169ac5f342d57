use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Unable to load asset {}: {source}", .path.display())]
    AssetRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Asset {} is empty", .0.display())]
    EmptyAsset(PathBuf),
    #[error("{0}\nusage: space_duel [--config PATH] [--assets DIR] [--laser-cap N]")]
    Usage(String),
}
