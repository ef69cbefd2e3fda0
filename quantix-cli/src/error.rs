//! Command-line error type.

use std::path::PathBuf;

use quantix_lib::error::DatasetError;
use quantix_lib::error::SelectError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("no asset with ticker '{0}'")]
    UnknownTicker(String),

    #[error("expected KEY=LABEL, got '{0}'")]
    InvalidSelect(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
