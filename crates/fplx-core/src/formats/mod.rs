// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod ivap;
pub mod text;
pub mod vpilot;

use crate::ledger::LedgerFile;
use crate::metadata::ExportMetadata;
use crate::native::NativeFormat;
use crate::route::Route;
use crate::route_string::gfp_string;
use crate::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every dialect a route can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    RxpGns,
    RxpGtn,
    Gfp,
    Txt,
    Rte,
    Fpr,
    IxegFpl,
    CorteIn,
    Fltplan,
    XFmc,
    UFmc,
    ProSim,
    Bbs,
    FeelThere,
    LeveldRte,
    Efbr,
    QwRte,
    Mdr,
    Tfdi,
    Vfp,
    Ivap,
    XIvap,
    Gpx,
    Fms,
}

/// How the orchestrator produces the file for a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Encoded in memory by [`encode`] and written in one go.
    Text,
    /// Merged into an existing multi-route file.
    Ledger(LedgerFile),
    /// Delegated to a [`crate::NativeFlightplanWriter`].
    Native(NativeFormat),
}

/// Default filename rule of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultFilename {
    /// Always `<DEP><sep><DEST><suffix>`.
    Short {
        sep: &'static str,
        suffix: &'static str,
    },
    /// Short or long form depending on the configuration.
    ShortOrLong {
        sep: &'static str,
        suffix: &'static str,
    },
    /// Ledger files have a fixed name.
    Fixed(&'static str),
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 24] = [
        ExportFormat::RxpGns,
        ExportFormat::RxpGtn,
        ExportFormat::Gfp,
        ExportFormat::Txt,
        ExportFormat::Rte,
        ExportFormat::Fpr,
        ExportFormat::IxegFpl,
        ExportFormat::CorteIn,
        ExportFormat::Fltplan,
        ExportFormat::XFmc,
        ExportFormat::UFmc,
        ExportFormat::ProSim,
        ExportFormat::Bbs,
        ExportFormat::FeelThere,
        ExportFormat::LeveldRte,
        ExportFormat::Efbr,
        ExportFormat::QwRte,
        ExportFormat::Mdr,
        ExportFormat::Tfdi,
        ExportFormat::Vfp,
        ExportFormat::Ivap,
        ExportFormat::XIvap,
        ExportFormat::Gpx,
        ExportFormat::Fms,
    ];

    /// Short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::RxpGns => "rxp-gns",
            ExportFormat::RxpGtn => "rxp-gtn",
            ExportFormat::Gfp => "gfp",
            ExportFormat::Txt => "txt",
            ExportFormat::Rte => "rte",
            ExportFormat::Fpr => "fpr",
            ExportFormat::IxegFpl => "ixeg-fpl",
            ExportFormat::CorteIn => "corte-in",
            ExportFormat::Fltplan => "fltplan",
            ExportFormat::XFmc => "x-fmc",
            ExportFormat::UFmc => "u-fmc",
            ExportFormat::ProSim => "pro-sim",
            ExportFormat::Bbs => "bbs",
            ExportFormat::FeelThere => "feel-there",
            ExportFormat::LeveldRte => "leveld-rte",
            ExportFormat::Efbr => "efbr",
            ExportFormat::QwRte => "qw-rte",
            ExportFormat::Mdr => "mdr",
            ExportFormat::Tfdi => "tfdi",
            ExportFormat::Vfp => "vfp",
            ExportFormat::Ivap => "ivap",
            ExportFormat::XIvap => "x-ivap",
            ExportFormat::Gpx => "gpx",
            ExportFormat::Fms => "fms",
        }
    }

    /// Key under which the last used directory is remembered.
    pub fn settings_key(&self) -> &'static str {
        match self {
            ExportFormat::RxpGns => "Route/RxpGns",
            ExportFormat::RxpGtn => "Route/RxpGfp",
            ExportFormat::Gfp => "Route/Gfp",
            ExportFormat::Txt => "Route/Txt",
            ExportFormat::Rte => "Route/Rte",
            ExportFormat::Fpr => "Route/Fpr",
            ExportFormat::IxegFpl => "Route/Fpl",
            ExportFormat::CorteIn => "Route/CorteIn",
            ExportFormat::Fltplan => "Route/Fltplan",
            ExportFormat::XFmc => "Route/XFmc",
            ExportFormat::UFmc => "Route/UFmc",
            ExportFormat::ProSim => "Route/CompanyRoutesXml",
            ExportFormat::Bbs => "Route/BbsPln",
            ExportFormat::FeelThere => "Route/FeelThereFpl",
            ExportFormat::LeveldRte => "Route/LeveldRte",
            ExportFormat::Efbr => "Route/Efb",
            ExportFormat::QwRte => "Route/QwRte",
            ExportFormat::Mdr => "Route/Mdx",
            ExportFormat::Tfdi => "Route/Tfdi",
            ExportFormat::Vfp => "Route/Vfp",
            ExportFormat::Ivap => "Route/Ivap",
            ExportFormat::XIvap => "Route/XIvap",
            ExportFormat::Gpx => "Route/Gpx",
            ExportFormat::Fms => "Route/Fms",
        }
    }

    /// File dialog title.
    pub fn title(&self, has_track: bool) -> &'static str {
        match self {
            ExportFormat::RxpGns => "Save Flight Plan as FPL for Reality XP GNS",
            ExportFormat::RxpGtn => "Save Flight Plan as GFP for Reality XP GTN",
            ExportFormat::Gfp => "Save Flight Plan as Garmin GFP Format",
            ExportFormat::Txt => "Save Flight Plan as TXT Format",
            ExportFormat::Rte => "Save Flight Plan as PMDG RTE Format",
            ExportFormat::Fpr => "Save Flight Plan as Majestic Dash FPR",
            ExportFormat::IxegFpl => "Save Flight Plan as IXEG FPL Format",
            ExportFormat::CorteIn => "Save Flight Plan to corte.in for Flight Factor Airbus",
            ExportFormat::Fltplan => "Save Flight Plan as FLTPLAN for iFly",
            ExportFormat::XFmc => "Save Flight Plan as FPL for X-FMC",
            ExportFormat::UFmc => "Save Flight Plan for UFMC",
            ExportFormat::ProSim => "Save Flight Plan to companyroutes.xml for ProSim",
            ExportFormat::Bbs => "Save Flight Plan for BBS Airbus",
            ExportFormat::FeelThere => "Save Flight Plan for FeelThere Aircraft",
            ExportFormat::LeveldRte => "Save Flight Plan for Level-D Aircraft",
            ExportFormat::Efbr => "Save Flight Plan for the AivlaSoft EFB",
            ExportFormat::QwRte => "Save Flight Plan for QualityWings Aircraft",
            ExportFormat::Mdr => "Save Flight Plan for Maddog X Aircraft",
            ExportFormat::Tfdi => "Save Flight Plan for TFDi Design 717",
            ExportFormat::Vfp => "Export Flight Plan as vPilot VFP",
            ExportFormat::Ivap => "Export Flight Plan as IvAp FPL",
            ExportFormat::XIvap => "Export Flight Plan as X-IvAp FPL",
            ExportFormat::Gpx if has_track => "Save Flightplan and Track as GPX Format",
            ExportFormat::Gpx => "Save Flight Plan as GPX Format",
            ExportFormat::Fms => "Save Flight Plan as X-Plane FMS 11",
        }
    }

    /// File dialog filter, e.g. `RTE Files (*.rte *.RTE);;All Files (*)`.
    pub fn file_filter(&self) -> String {
        let (label, pattern) = match self {
            ExportFormat::RxpGns
            | ExportFormat::IxegFpl
            | ExportFormat::FeelThere
            | ExportFormat::Ivap
            | ExportFormat::XIvap => ("FPL Files", "(*.fpl *.FPL)"),
            ExportFormat::RxpGtn | ExportFormat::Gfp => ("Garmin GFP Files", "(*.gfp *.GFP)"),
            ExportFormat::Txt => ("Text Files", "(*.txt *.TXT)"),
            ExportFormat::Rte | ExportFormat::LeveldRte | ExportFormat::QwRte => {
                ("RTE Files", "(*.rte *.RTE)")
            }
            ExportFormat::Fpr => ("FPR Files", "(*.fpr *.FPR)"),
            ExportFormat::CorteIn => ("corte.in Files", "(corte.in)"),
            ExportFormat::Fltplan => ("iFly FLTPLAN Files", "(*.fltplan *.FLTPLAN)"),
            ExportFormat::XFmc => ("X-FMC Files", "(*.fpl *.FPL)"),
            ExportFormat::UFmc => ("UFMC Files", "(*.ufmc *.UFMC)"),
            ExportFormat::ProSim => ("companyroutes.xml Files", "(companyroutes.xml)"),
            ExportFormat::Bbs => ("PLN Files", "(*.pln *.PLN)"),
            ExportFormat::Efbr => ("EFBR Files", "(*.efbr *.EFBR)"),
            ExportFormat::Mdr => ("MDR Files", "(*.mdr *.MDR)"),
            ExportFormat::Tfdi => ("XML Files", "(*.xml *.XML)"),
            ExportFormat::Vfp => ("VFP Files", "(*.vfp *.VFP)"),
            ExportFormat::Gpx => ("GPX Files", "(*.gpx *.GPX)"),
            ExportFormat::Fms => ("FMS Files", "(*.fms *.FMS)"),
        };
        format!("{} {};;All Files (*)", label, pattern)
    }

    pub fn default_filename(&self) -> DefaultFilename {
        use DefaultFilename::*;
        match self {
            ExportFormat::RxpGns => Short { sep: "", suffix: ".fpl" },
            ExportFormat::RxpGtn => Short { sep: "_", suffix: ".gfp" },
            ExportFormat::Gfp => Short { sep: "-", suffix: ".gfp" },
            ExportFormat::Txt => Short { sep: "", suffix: ".txt" },
            ExportFormat::Rte | ExportFormat::QwRte => Short { sep: "", suffix: ".rte" },
            ExportFormat::Fpr => Short { sep: "", suffix: ".fpr" },
            ExportFormat::IxegFpl
            | ExportFormat::XFmc
            | ExportFormat::Ivap
            | ExportFormat::XIvap => Short { sep: "", suffix: ".fpl" },
            ExportFormat::CorteIn => Fixed("corte.in"),
            ExportFormat::Fltplan => Short { sep: "", suffix: ".fltplan" },
            ExportFormat::UFmc => Short { sep: "", suffix: ".ufmc" },
            ExportFormat::ProSim => Fixed("companyroutes.xml"),
            ExportFormat::Bbs => Short { sep: "", suffix: ".pln" },
            ExportFormat::FeelThere => Short { sep: "_", suffix: ".fpl" },
            ExportFormat::LeveldRte => Short { sep: "_", suffix: ".rte" },
            ExportFormat::Efbr => Short { sep: "_", suffix: ".efbr" },
            ExportFormat::Mdr => Short { sep: "", suffix: ".mdr" },
            ExportFormat::Tfdi => Short { sep: "", suffix: ".xml" },
            ExportFormat::Vfp => Short { sep: "", suffix: ".vfp" },
            ExportFormat::Gpx => ShortOrLong { sep: "", suffix: ".gpx" },
            ExportFormat::Fms => Short { sep: "", suffix: ".fms" },
        }
    }

    /// Whether a host file dialog should ask before replacing an existing
    /// file. Ledgers are merged into and never asked for.
    pub fn confirm_overwrite(&self) -> bool {
        !matches!(self.kind(), FormatKind::Ledger(_))
    }

    /// Status line shown after a successful export.
    pub fn status_message(&self, has_track: bool) -> &'static str {
        match self {
            ExportFormat::RxpGns | ExportFormat::IxegFpl => "Flight plan saved as FPL.",
            ExportFormat::RxpGtn | ExportFormat::Gfp => "Flight plan saved as GFP.",
            ExportFormat::Txt => "Flight plan saved as TXT.",
            ExportFormat::Rte => "Flight plan saved as RTE.",
            ExportFormat::Fpr => "Flight plan saved as FPR.",
            ExportFormat::CorteIn => "Flight plan added to corte.in.",
            ExportFormat::Fltplan => "Flight plan saved as FLTPLAN for iFly.",
            ExportFormat::XFmc => "Flight plan saved as FPL for X-FMC.",
            ExportFormat::UFmc => "Flight plan saved for UFMC.",
            ExportFormat::ProSim => "Flight plan added to companyroutes.xml.",
            ExportFormat::Bbs => "Flight plan saved for BBS.",
            ExportFormat::FeelThere => "Flight plan saved for FeelThere.",
            ExportFormat::LeveldRte => "Flight plan saved for Level-D.",
            ExportFormat::Efbr => "Flight plan saved for EFB.",
            ExportFormat::QwRte => "Flight plan saved for QualityWings.",
            ExportFormat::Mdr => "Flight plan saved for Maddog X.",
            ExportFormat::Tfdi => "Flight plan saved for TFDi.",
            ExportFormat::Vfp => "Flight plan saved for vPilot.",
            ExportFormat::Ivap => "Flight plan saved for IvAp.",
            ExportFormat::XIvap => "Flight plan saved for X-IvAp.",
            ExportFormat::Gpx if has_track => "Flight plan and track saved as GPX.",
            ExportFormat::Gpx => "Flight plan saved as GPX.",
            ExportFormat::Fms => "Flight plan saved as FMS.",
        }
    }

    /// GPX can hold any route, every other dialect needs airport endpoints.
    pub fn validates_endpoints(&self) -> bool {
        *self != ExportFormat::Gpx
    }

    /// ATC filing dialects ask the user for an [`ExportMetadata`] record.
    pub fn needs_metadata(&self) -> bool {
        matches!(self, ExportFormat::Vfp | ExportFormat::Ivap | ExportFormat::XIvap)
    }

    pub fn kind(&self) -> FormatKind {
        match self {
            ExportFormat::RxpGtn
            | ExportFormat::Gfp
            | ExportFormat::Txt
            | ExportFormat::IxegFpl
            | ExportFormat::XFmc
            | ExportFormat::UFmc
            | ExportFormat::Vfp
            | ExportFormat::Ivap
            | ExportFormat::XIvap => FormatKind::Text,
            ExportFormat::CorteIn => FormatKind::Ledger(LedgerFile::CorteIn),
            ExportFormat::ProSim => FormatKind::Ledger(LedgerFile::CompanyRoutes),
            ExportFormat::RxpGns => FormatKind::Native(NativeFormat::GarminGns),
            ExportFormat::Rte => FormatKind::Native(NativeFormat::Rte),
            ExportFormat::Fpr => FormatKind::Native(NativeFormat::Fpr),
            ExportFormat::Fltplan => FormatKind::Native(NativeFormat::Fltplan),
            ExportFormat::Bbs => FormatKind::Native(NativeFormat::BbsPln),
            ExportFormat::FeelThere => FormatKind::Native(NativeFormat::FeelThereFpl),
            ExportFormat::LeveldRte => FormatKind::Native(NativeFormat::LeveldRte),
            ExportFormat::Efbr => FormatKind::Native(NativeFormat::Efbr),
            ExportFormat::QwRte => FormatKind::Native(NativeFormat::QwRte),
            ExportFormat::Mdr => FormatKind::Native(NativeFormat::Mdr),
            ExportFormat::Tfdi => FormatKind::Native(NativeFormat::Tfdi),
            ExportFormat::Gpx => FormatKind::Native(NativeFormat::Gpx),
            ExportFormat::Fms => FormatKind::Native(NativeFormat::Fms11),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.name() == wanted || f.name().replace('-', "") == wanted)
            .ok_or_else(|| format!("Unknown export format \"{}\"", s))
    }
}

/// Encodes the procedure-adjusted `route` for a [`FormatKind::Text`] dialect.
/// ATC filing dialects read their fields from `metadata`.
pub fn encode(
    format: ExportFormat,
    route: &Route,
    metadata: Option<&ExportMetadata>,
    garmin_user_waypoints: bool,
) -> Result<Vec<u8>> {
    let missing_metadata =
        || ExportError::Format(format!("{} export needs flight plan metadata", format));

    let text = match format {
        ExportFormat::RxpGtn => gfp_string(route, true, garmin_user_waypoints),
        ExportFormat::Gfp => gfp_string(route, false, garmin_user_waypoints),
        ExportFormat::Txt | ExportFormat::IxegFpl | ExportFormat::XFmc => text::plain_route(route),
        ExportFormat::UFmc => text::ufmc(route),
        ExportFormat::Vfp => return vpilot::write_vfp(metadata.ok_or_else(missing_metadata)?),
        ExportFormat::Ivap => {
            ivap::write_ivap(metadata.ok_or_else(missing_metadata)?, ivap::Variant::Ivap)
        }
        ExportFormat::XIvap => {
            ivap::write_ivap(metadata.ok_or_else(missing_metadata)?, ivap::Variant::XIvap)
        }
        other => return Err(ExportError::Format(format!("{} is not a text dialect", other))),
    };
    Ok(text.into_bytes())
}
