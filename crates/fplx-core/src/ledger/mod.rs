// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Shared multi-route files that new routes are merged into instead of
//! overwriting them.

pub mod company_routes;
pub mod corte_in;
pub mod roller;

use crate::route::Route;
use crate::{ExportError, Result};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerFile {
    /// Flight Factor `corte.in`.
    CorteIn,
    /// ProSim `companyroutes.xml`.
    CompanyRoutes,
}

impl LedgerFile {
    /// Merges `route` into the ledger at `path` and returns the route name used.
    pub fn append_route(&self, path: &Path, route: &Route) -> Result<String> {
        match self {
            LedgerFile::CorteIn => corte_in::append_route(path, route),
            LedgerFile::CompanyRoutes => company_routes::append_route(path, route),
        }
    }
}

/// Reads a ledger file. A missing file counts as empty, invalid UTF-8 is
/// replaced.
fn read_existing(path: &Path, context: &'static str) -> Result<String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ExportError::io(context, path, e)),
    }
}
