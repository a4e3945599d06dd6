use std::{io, path::PathBuf};

use thiserror::Error;
use wpdl_common::error::SiteUrlError;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input from console: {source}")]
    DialoguerIOFail {
        #[from]
        source: dialoguer::Error,
    },

    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("{source}")]
    InvalidSite {
        #[from]
        source: SiteUrlError,
    },

    #[error("Failed to read settings file {}: {message}", path.display())]
    SettingsParseFail { path: PathBuf, message: String },

    #[error("Could not determine a config directory for this platform")]
    NoConfigDir,
}
