use cascade::CascadeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error(transparent)]
    Cascade(#[from] CascadeError),

    #[error("Nothing is selected")]
    NothingSelected,

    #[error("No single component instance is selected")]
    NoInstanceSelected,

    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A logger is already installed")]
    Logger(#[from] log::SetLoggerError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, StudioError>;
