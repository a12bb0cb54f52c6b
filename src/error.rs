use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// Matrix construction from ragged or empty row data.
    Shape(String),
    /// Elementwise operation between differently sized matrices.
    SizeMismatch(String),
    /// Incompatible dimensions for `dot`, layer assembly, or a layer input.
    Dimension(String),
    /// Paired sample sequences that do not line up.
    Data(String),
    /// Invalid training hyperparameters.
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Shape(msg) => write!(f, "invalid shape: {msg}"),
            Error::SizeMismatch(msg) => write!(f, "size mismatch: {msg}"),
            Error::Dimension(msg) => write!(f, "dimension error: {msg}"),
            Error::Data(msg) => write!(f, "invalid data: {msg}"),
            Error::Config(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
