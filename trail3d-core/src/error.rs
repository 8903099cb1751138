/// Error type for the core library
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("unknown figure '{0}' (expected donut, cube, bridge or torus-cube)")]
    UnknownFigure(String),

    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
