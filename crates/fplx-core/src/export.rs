// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Runs one export: route validation, metadata, file choice, encoding and
//! writing. All user interaction goes through [`ExportUi`].

use crate::adjust::AdjustOptions;
use crate::config::ExportConfig;
use crate::filename::{build_default, build_short};
use crate::formats::{self, DefaultFilename, ExportFormat, FormatKind};
use crate::metadata::{AircraftPerformance, ExportMetadata};
use crate::native::{NativeFlightplanWriter, NativeRequest, NativeWriteError};
use crate::route::{Route, TrackPoint};
use crate::route_string::{route_string, RouteStringOptions};
use crate::{ExportError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

/// FeelThere needs a plausible ground speed, below this the cruise speed is used.
const MIN_GROUND_SPEED_KTS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteIssue {
    /// Departure or destination is not an airport.
    InvalidEndpoints,
    /// The departure airport has parking spots but none is selected.
    NoParking,
}

impl fmt::Display for RouteIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteIssue::InvalidEndpoints => {
                f.write_str("Flight plan must have a departure and a destination airport.")
            }
            RouteIssue::NoParking => f.write_str("The departure airport has no start position selected."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationChoice {
    Cancel,
    /// The user wants to correct the route first.
    FixAndRetry,
    SaveAnyway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    ValidationDeclined,
    FixRequested,
    /// Metadata or file dialog was closed.
    DialogClosed,
}

/// What the file dialog is seeded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub title: &'static str,
    pub filter: String,
    pub settings_key: &'static str,
    pub directory: Option<PathBuf>,
    pub filename: Option<String>,
    pub confirm_overwrite: bool,
}

/// The host's dialogs and status bar.
pub trait ExportUi {
    fn confirm_invalid_route(&mut self, issue: RouteIssue) -> ValidationChoice;
    /// Returns false when the user closes the dialog.
    fn edit_metadata(&mut self, format: ExportFormat, metadata: &mut ExportMetadata) -> bool;
    /// `None` or an empty path cancels the export.
    fn choose_file(&mut self, request: &FileRequest) -> Option<PathBuf>;
    fn show_status(&mut self, message: &str);
    fn show_error(&mut self, error: &ExportError);
}

/// Snapshot of the application state an export reads.
#[derive(Debug, Clone)]
pub struct ExportInput {
    pub route: Route,
    pub performance: AircraftPerformance,
    pub track: Vec<TrackPoint>,
    /// AIRAC cycle of the loaded navdata.
    pub nav_cycle: String,
    pub now: DateTime<Utc>,
}

impl ExportInput {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            performance: AircraftPerformance::default(),
            track: Vec::new(),
            nav_cycle: String::new(),
            now: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub enum ExportOutcome {
    Success { path: PathBuf, message: String },
    Cancelled(CancelReason),
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Success { .. })
    }
}

pub struct RouteExporter<U, W> {
    ui: U,
    writer: W,
    config: ExportConfig,
    validate_parking: bool,
}

impl<U: ExportUi, W: NativeFlightplanWriter> RouteExporter<U, W> {
    pub fn new(ui: U, writer: W, config: ExportConfig) -> Self {
        Self {
            ui,
            writer,
            config,
            validate_parking: false,
        }
    }

    /// Also ask the user when no departure parking is selected.
    pub fn with_parking_validation(mut self, enabled: bool) -> Self {
        self.validate_parking = enabled;
        self
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn into_config(self) -> ExportConfig {
        self.config
    }

    pub fn export(&mut self, format: ExportFormat, input: &ExportInput) -> ExportOutcome {
        log::info!(
            "Exporting {} -> {} as {}",
            input.route.departure_ident(),
            input.route.destination_ident(),
            format
        );

        if let Some(reason) = self.validate(format, &input.route) {
            log::warn!("Export as {} stopped at validation: {:?}", format, reason);
            return ExportOutcome::Cancelled(reason);
        }

        let metadata = if format.needs_metadata() {
            let mut metadata =
                ExportMetadata::from_route(&input.route, &input.performance, format, input.now.time());
            if !self.ui.edit_metadata(format, &mut metadata) {
                log::info!("Metadata dialog for {} closed", format);
                return ExportOutcome::Cancelled(CancelReason::DialogClosed);
            }
            Some(metadata)
        } else {
            None
        };

        let request = self.file_request(format, input);
        let path = match self.ui.choose_file(&request) {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                log::info!("File dialog for {} closed", format);
                return ExportOutcome::Cancelled(CancelReason::DialogClosed);
            }
        };
        log::debug!("Export target {}", path.display());

        match self.write(format, input, metadata.as_ref(), &path) {
            Ok(()) => {
                self.config.remember_directory(format.settings_key(), &path);
                let message = format.status_message(!input.track.is_empty()).to_string();
                self.ui.show_status(&message);
                log::info!("Exported {} to {}", format, path.display());
                ExportOutcome::Success { path, message }
            }
            Err(e) => {
                log::warn!("Export as {} to {} failed: {}", format, path.display(), e);
                self.ui.show_error(&e);
                ExportOutcome::Failed(e)
            }
        }
    }

    fn validate(&mut self, format: ExportFormat, route: &Route) -> Option<CancelReason> {
        let mut issues = Vec::new();
        if format.validates_endpoints()
            && !(route.has_valid_departure() && route.has_valid_destination())
        {
            issues.push(RouteIssue::InvalidEndpoints);
        }
        if self.validate_parking && !route.has_valid_parking() {
            issues.push(RouteIssue::NoParking);
        }

        for issue in issues {
            match self.ui.confirm_invalid_route(issue) {
                ValidationChoice::SaveAnyway => continue,
                ValidationChoice::Cancel => return Some(CancelReason::ValidationDeclined),
                ValidationChoice::FixAndRetry => return Some(CancelReason::FixRequested),
            }
        }
        None
    }

    fn file_request(&self, format: ExportFormat, input: &ExportInput) -> FileRequest {
        let route = &input.route;
        let (filename, fixed) = match format.default_filename() {
            DefaultFilename::Short { sep, suffix } => (build_short(route, sep, suffix), false),
            DefaultFilename::ShortOrLong { sep, suffix } => (
                build_default(route, self.config.route_save_short_name, sep, suffix, ""),
                false,
            ),
            DefaultFilename::Fixed(name) => (name.to_string(), true),
        };

        FileRequest {
            title: format.title(!input.track.is_empty()),
            filter: format.file_filter(),
            settings_key: format.settings_key(),
            directory: self
                .config
                .last_directory(format.settings_key())
                .map(Path::to_path_buf),
            filename: (fixed || self.config.propose_filename).then_some(filename),
            confirm_overwrite: format.confirm_overwrite(),
        }
    }

    fn write(
        &self,
        format: ExportFormat,
        input: &ExportInput,
        metadata: Option<&ExportMetadata>,
        path: &Path,
    ) -> Result<()> {
        let route = input.route.adjusted_to_procedure_options(AdjustOptions {
            keep_approach_waypoints: self.config.save_approach_waypoints,
            keep_sid_star_waypoints: self.config.save_sid_star_waypoints,
            replace_custom_waypoints: true,
            remove_alternates: true,
        });

        match format.kind() {
            FormatKind::Text => {
                let bytes =
                    formats::encode(format, &route, metadata, self.config.garmin_user_waypoints)?;
                std::fs::write(path, bytes).map_err(|e| ExportError::io("While saving file", path, e))
            }
            FormatKind::Ledger(ledger) => ledger.append_route(path, &route).map(|_| ()),
            FormatKind::Native(native) => {
                let performance = &input.performance;
                let ground_speed_kts = if performance.average_ground_speed_kts < MIN_GROUND_SPEED_KTS {
                    performance.cruise_speed_kts
                } else {
                    performance.average_ground_speed_kts
                };
                let request = NativeRequest {
                    route: &route,
                    route_string: route_string(&route, 0.0, RouteStringOptions::NONE),
                    cycle: input.nav_cycle.clone(),
                    ground_speed_kts,
                    track: &input.track,
                    cruise_altitude_ft: route.cruising_altitude_ft,
                    gns_user_waypoints: self.config.garmin_user_waypoints,
                    jet_airway_flags: route.jet_airway_flags(),
                };
                self.writer
                    .write(native, &request, path)
                    .map_err(|e| match e {
                        NativeWriteError::Format(message) => ExportError::Format(message),
                        NativeWriteError::Io(source) => {
                            ExportError::io("While saving file", path, source)
                        }
                        NativeWriteError::Other(e) => ExportError::Unknown(format!("{:#}", e)),
                    })
            }
        }
    }
}
