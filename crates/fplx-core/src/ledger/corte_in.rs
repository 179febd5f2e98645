// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Flight Factor `corte.in`, one route per line:
//! `RTE LHRAMS01 EGLL 27L BPK7G BPK DCT CLN UL620 REDFA REDF1A EHAM FL250`

use crate::route::Route;
use crate::route_string::{route_string, RouteStringOptions};
use crate::{ExportError, Result};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Route string options for corte.in lines.
pub const OPTIONS: RouteStringOptions = RouteStringOptions {
    dct: true,
    no_final_dct: true,
    start_and_dest: true,
    sid_star: true,
    sid_star_space: true,
    runway: true,
    flight_level: true,
    ..RouteStringOptions::NONE
};

/// Names of all routes in the file content, taken from the second token of each line.
pub fn route_names(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_uppercase)
        .collect()
}

/// Route names are at most eight characters. On collision the base is cut to
/// six characters and padded with a zero-filled counter up to eight.
pub fn unique_name(base: &str, existing: &HashSet<String>) -> Result<String> {
    let stem: String = base.chars().take(6).collect();
    let width = 8usize.saturating_sub(stem.chars().count());

    let mut name = base.to_string();
    let mut counter = 1;
    while existing.contains(&name) {
        if counter >= 99 {
            return Err(ExportError::NameExhausted(base.to_string()));
        }
        name = format!("{}{:0width$}", stem, counter, width = width);
        counter += 1;
    }
    Ok(name)
}

/// Appends `route` as a new line and returns the route name used.
pub fn append_route(path: &Path, route: &Route) -> Result<String> {
    let content = super::read_existing(path, "While reading corte.in file")?;
    let existing = route_names(&content);

    let base = format!("{}{}", route.departure_ident(), route.destination_ident());
    let name = unique_name(&base, &existing)?;
    let line = format!("RTE {} {}\n", name, route_string(route, 0.0, OPTIONS));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExportError::io("While saving to corte.in file", path, e))?;

    let mut out = String::new();
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&line);
    file.write_all(out.as_bytes())
        .map_err(|e| ExportError::io("While saving to corte.in file", path, e))?;

    log::info!(
        "Added route {} to {} ({} routes before)",
        name,
        path.display(),
        existing.len()
    );
    Ok(name)
}
