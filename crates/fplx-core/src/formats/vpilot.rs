// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! vPilot `.vfp` flight plans: a single `FlightPlan` element carrying every
//! field as an attribute.

use crate::metadata::ExportMetadata;
use crate::{ExportError, Result};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;

fn xml_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Format(format!("XML error: {}", e))
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub fn write_vfp(meta: &ExportMetadata) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;

    let cruise_altitude = meta.cruise_altitude.to_string();
    let speed = meta.speed.to_string();
    let departure_time = meta.departure_time.format("%H%M").to_string();
    let departure_time_actual = meta
        .departure_time_actual
        .map(|t| t.format("%H%M").to_string())
        .unwrap_or_else(|| "0".to_string());
    let enroute_hours = (meta.enroute_minutes / 60).to_string();
    let enroute_minutes = (meta.enroute_minutes % 60).to_string();
    let fuel_hours = (meta.endurance_minutes / 60).to_string();
    let fuel_minutes = (meta.endurance_minutes % 60).to_string();

    let mut root = BytesStart::new("FlightPlan");
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    root.push_attribute(("xmlns:xsd", "http://www.w3.org/2001/XMLSchema"));
    root.push_attribute(("FlightType", meta.flight_rules.as_str()));
    root.push_attribute(("Equipment", meta.equipment.as_str()));
    root.push_attribute(("CruiseAltitude", cruise_altitude.as_str()));
    root.push_attribute(("CruiseSpeed", speed.as_str()));
    root.push_attribute(("DepartureAirport", meta.departure.as_str()));
    root.push_attribute(("DestinationAirport", meta.destination.as_str()));
    root.push_attribute(("AlternateAirport", meta.alternate.as_str()));
    root.push_attribute(("Route", meta.route.as_str()));
    root.push_attribute(("Remarks", meta.remarks.as_str()));
    root.push_attribute(("IsHeavy", bool_str(meta.is_heavy)));
    root.push_attribute(("EquipmentPrefix", meta.equipment_prefix.as_str()));
    root.push_attribute(("EquipmentSuffix", meta.equipment_suffix.as_str()));
    root.push_attribute(("DepartureTime", departure_time.as_str()));
    root.push_attribute(("DepartureTimeAct", departure_time_actual.as_str()));
    root.push_attribute(("EnrouteHours", enroute_hours.as_str()));
    root.push_attribute(("EnrouteMinutes", enroute_minutes.as_str()));
    root.push_attribute(("FuelHours", fuel_hours.as_str()));
    root.push_attribute(("FuelMinutes", fuel_minutes.as_str()));
    root.push_attribute(("VoiceType", meta.voice_type.as_str()));

    writer.write_event(Event::Empty(root)).map_err(xml_err)?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
