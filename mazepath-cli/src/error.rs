use mazepath::{GenerationError, LoadError, SolveError};
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
