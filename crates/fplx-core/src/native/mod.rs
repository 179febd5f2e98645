// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Aircraft specific flight plan files that are written from the route's leg
//! list rather than from a route string.

pub mod fms;
pub mod gpx;

use crate::route::{Route, TrackPoint};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeFormat {
    /// Reality XP GNS 530W/430W FPL.
    GarminGns,
    /// PMDG RTE.
    Rte,
    /// Majestic Dash FPR.
    Fpr,
    /// iFly FLTPLAN.
    Fltplan,
    BbsPln,
    FeelThereFpl,
    LeveldRte,
    /// AivlaSoft EFB route.
    Efbr,
    QwRte,
    /// Maddog X.
    Mdr,
    Tfdi,
    Gpx,
    /// X-Plane 11 FMS.
    Fms11,
}

/// Everything a native writer may need besides the target path.
#[derive(Debug, Clone)]
pub struct NativeRequest<'a> {
    /// Procedure-adjusted route without alternates.
    pub route: &'a Route,
    /// Plain route string, used by the EFB.
    pub route_string: String,
    /// AIRAC cycle of the loaded navdata, e.g. `2410`.
    pub cycle: String,
    /// Ground speed for FeelThere.
    pub ground_speed_kts: f32,
    /// Aircraft trail for GPX.
    pub track: &'a [TrackPoint],
    pub cruise_altitude_ft: f32,
    /// Write user waypoints by name for the GNS.
    pub gns_user_waypoints: bool,
    /// One flag per leg, needed by TFDi.
    pub jet_airway_flags: &'a [bool],
}

#[derive(Error, Debug)]
pub enum NativeWriteError {
    /// The writer rejected the route or format.
    #[error("{0}")]
    Format(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Serializer for [`NativeFormat`] files. Hosts with a complete set of
/// aircraft writers implement this; [`BuiltinWriter`] covers GPX and FMS.
pub trait NativeFlightplanWriter {
    fn write(
        &self,
        format: NativeFormat,
        request: &NativeRequest<'_>,
        path: &Path,
    ) -> Result<(), NativeWriteError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinWriter;

impl NativeFlightplanWriter for BuiltinWriter {
    fn write(
        &self,
        format: NativeFormat,
        request: &NativeRequest<'_>,
        path: &Path,
    ) -> Result<(), NativeWriteError> {
        let bytes = match format {
            NativeFormat::Gpx => gpx::write_gpx(request)?,
            NativeFormat::Fms11 => fms::write_fms11(request).into_bytes(),
            other => {
                return Err(NativeWriteError::Format(format!(
                    "No writer available for {:?} flight plans",
                    other
                )))
            }
        };
        log::debug!("Writing {:?} flight plan to {}", format, path.display());
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
