// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::route::{FlightplanType, Route};
use regex::Regex;
use std::sync::OnceLock;

fn illegal_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("valid filename pattern"))
}

/// Strips characters most filesystems reject and trims the result.
pub fn clean_filename(name: &str) -> String {
    illegal_chars().replace_all(name, "").trim().to_string()
}

/// `<DEP><sep><DEST><suffix>`, e.g. `EDDF_EDDH.rte`.
pub fn build_short(route: &Route, sep: &str, suffix: &str) -> String {
    clean_filename(&format!(
        "{}{}{}{}",
        route.departure_ident(),
        sep,
        route.destination_ident(),
        suffix
    ))
}

/// `IFR Frankfurt am Main (EDDF) to Hamburg (EDDH)<extension><suffix>`.
pub fn build_long(route: &Route, extension: &str, suffix: &str) -> String {
    let rules = match route.flightplan_type {
        FlightplanType::Ifr => "IFR ",
        FlightplanType::Vfr => "VFR ",
    };
    let airport = |name: Option<&String>, ident: &str| match name {
        Some(name) if !name.is_empty() => format!("{} ({})", name, ident),
        _ => ident.to_string(),
    };
    clean_filename(&format!(
        "{}{} to {}{}{}",
        rules,
        airport(route.departure_name.as_ref(), route.departure_ident()),
        airport(route.destination_name.as_ref(), route.destination_ident()),
        extension,
        suffix
    ))
}

/// Short or long name depending on the configured preference.
pub fn build_default(route: &Route, short: bool, sep: &str, suffix: &str, extension: &str) -> String {
    if short {
        build_short(route, sep, suffix)
    } else {
        build_long(route, extension, suffix)
    }
}
