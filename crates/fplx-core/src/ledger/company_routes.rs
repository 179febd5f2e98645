// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! ProSim `companyroutes.xml`:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <companyroutes>
//!   <route name="KDSMKOKC">KDSM DSM J25 TUL KOKC </route>
//!   <route name="EDDSEDDH">EDDS KRH UZ210 NOSPA EDDL</route>
//! </companyroutes>
//! ```

use super::roller::FileRoller;
use crate::filename::build_short;
use crate::route::Route;
use crate::route_string::{route_string, RouteStringOptions};
use crate::{ExportError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// `(name, route string)` in file order.
pub type CompanyRoute = (String, String);

pub const OPTIONS: RouteStringOptions = RouteStringOptions {
    start_and_dest: true,
    ..RouteStringOptions::NONE
};

/// Path of the single backup kept next to the ledger.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push("_backup");
    PathBuf::from(name)
}

/// Parses ledger content. Elements other than `route` are skipped.
pub fn parse_routes(content: &str) -> std::result::Result<Vec<CompanyRoute>, String> {
    let mut reader = Reader::from_str(content);
    let mut routes = Vec::new();
    let mut current: Option<CompanyRoute> = None;
    let mut root_open = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) if e.name().as_ref() == b"companyroutes" => root_open = true,
            Event::End(e) if e.name().as_ref() == b"companyroutes" => root_open = false,
            Event::Start(e) if e.name().as_ref() == b"route" => {
                current = Some((route_name(&e)?, String::new()));
            }
            Event::Empty(e) if e.name().as_ref() == b"route" => {
                routes.push((route_name(&e)?, String::new()));
            }
            Event::Text(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t.unescape().map_err(|e| e.to_string())?);
                }
            }
            Event::CData(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(e) if e.name().as_ref() == b"route" => {
                routes.extend(current.take());
            }
            Event::Eof => {
                if let Some((name, _)) = current {
                    return Err(format!("Unexpected end of file in route \"{}\"", name));
                }
                if root_open {
                    return Err("Unexpected end of file in companyroutes".to_string());
                }
                break;
            }
            _ => {}
        }
    }
    Ok(routes)
}

fn route_name(e: &BytesStart<'_>) -> std::result::Result<String, String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value().map_err(|e| e.to_string())?.into_owned());
        }
    }
    Ok(String::new())
}

/// Reads all routes of the ledger. A missing or empty file has none.
pub fn read_routes(path: &Path) -> Result<Vec<CompanyRoute>> {
    let content = super::read_existing(path, "While reading from companyroutes.xml file")?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_routes(&content).map_err(|message| ExportError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn xml_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Format(format!("XML error: {}", e))
}

pub fn encode_routes(routes: &[CompanyRoute]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("companyroutes")))
        .map_err(xml_err)?;

    for (name, text) in routes {
        let mut start = BytesStart::new("route");
        start.push_attribute(("name", name.as_str()));
        writer.write_event(Event::Start(start)).map_err(xml_err)?;
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("route")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("companyroutes")))
        .map_err(xml_err)?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Ledger name with a two digit counter on collision.
pub fn unique_name(base: &str, existing: &HashSet<&str>) -> Result<String> {
    if !existing.contains(base) {
        return Ok(base.to_string());
    }
    (1..99)
        .map(|i| format!("{}{:02}", base, i))
        .find(|name| !existing.contains(name.as_str()))
        .ok_or_else(|| ExportError::NameExhausted(base.to_string()))
}

/// Adds `route` at the end of the ledger after backing up the current file.
/// Returns the route name used. Neither the ledger nor its backup is touched
/// when the existing file cannot be read or no free name is left.
pub fn append_route(path: &Path, route: &Route) -> Result<String> {
    let mut routes = read_routes(path)?;

    let name = {
        let existing: HashSet<&str> = routes.iter().map(|(n, _)| n.as_str()).collect();
        unique_name(&build_short(route, "", ""), &existing)?
    };
    routes.push((name.clone(), route_string(route, 0.0, OPTIONS)));
    let bytes = encode_routes(&routes)?;

    let backup = backup_path(path);
    FileRoller::new(1)
        .roll(&backup)
        .map_err(|e| ExportError::io("While rolling backup", &backup, e))?;
    if path.exists() {
        std::fs::copy(path, &backup)
            .map_err(|e| ExportError::io("While creating backup", &backup, e))?;
        log::info!("Copied {} to {}", path.display(), backup.display());
    }

    std::fs::write(path, bytes)
        .map_err(|e| ExportError::io("While saving to companyroutes.xml file", path, e))?;
    log::info!(
        "Added route {} to {} ({} routes)",
        name,
        path.display(),
        routes.len()
    );
    Ok(name)
}
