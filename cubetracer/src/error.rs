use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("invalid cache layout")]
    CacheLayout(#[from] CacheLayoutError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("minimum path contribution must be finite and >= 0, got {0}")]
    InvalidMinContribution(f32),

    #[error("at least one bounce is required")]
    ZeroBounces,

    #[error("field of view must lie in (0, PI), got {0}")]
    InvalidFov(f32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheLayoutError {
    #[error("cache image `{0}` is registered more than once")]
    DuplicateImage(String),

    #[error("unknown cache image `{0}`")]
    UnknownImage(String),

    #[error("cache layout contains no images")]
    Empty,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
