// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod adjust;
pub mod config;
pub mod export;
pub mod filename;
pub mod formats;
pub mod ledger;
pub mod metadata;
pub mod native;
pub mod route;
pub mod route_string;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use adjust::AdjustOptions;
pub use config::ExportConfig;
pub use export::{
    CancelReason, ExportInput, ExportOutcome, ExportUi, FileRequest, RouteExporter, RouteIssue,
    ValidationChoice,
};
pub use formats::ExportFormat;
pub use metadata::{AircraftPerformance, ExportMetadata};
pub use native::{BuiltinWriter, NativeFlightplanWriter, NativeFormat, NativeWriteError};
pub use route::{FlightplanEntry, FlightplanType, Pos, Route, TrackPoint};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{context} {}: {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error reading \"{}\": {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("{0}")]
    Format(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
    #[error("No unique route name left for \"{0}\"")]
    NameExhausted(String),
}

impl ExportError {
    pub(crate) fn io(context: &'static str, path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            context,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
