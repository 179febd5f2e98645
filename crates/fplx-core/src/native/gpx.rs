// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::{NativeRequest, NativeWriteError};
use crate::route::WaypointType;
use chrono::{DateTime, SecondsFormat};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

const FEET_TO_METERS: f64 = 0.3048;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn xml_err(e: impl std::fmt::Display) -> NativeWriteError {
    NativeWriteError::Format(format!("XML error: {}", e))
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), NativeWriteError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

fn point_start(name: &str, lat: f64, lon: f64) -> BytesStart<'_> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("lat", format!("{:.6}", lat).as_str()));
    start.push_attribute(("lon", format!("{:.6}", lon).as_str()));
    start
}

fn waypoint_desc(kind: WaypointType) -> &'static str {
    match kind {
        WaypointType::Airport => "Airport",
        WaypointType::Vor => "VOR",
        WaypointType::Ndb => "NDB",
        WaypointType::Waypoint => "Waypoint",
        WaypointType::User => "User",
    }
}

/// GPX 1.1 document with the route as `rte` and the aircraft trail as one `trk` segment.
pub fn write_gpx(request: &NativeRequest<'_>) -> Result<Vec<u8>, NativeWriteError> {
    let route = request.route;
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    let mut gpx = BytesStart::new("gpx");
    gpx.push_attribute(("xmlns", "http://www.topografix.com/GPX/1/1"));
    gpx.push_attribute(("version", "1.1"));
    gpx.push_attribute(("creator", "fplx"));
    writer.write_event(Event::Start(gpx)).map_err(xml_err)?;

    let name = format!(
        "{} to {}",
        route.legs.first().map(|l| l.route_token()).unwrap_or_default(),
        route.legs.last().map(|l| l.route_token()).unwrap_or_default()
    );

    writer
        .write_event(Event::Start(BytesStart::new("rte")))
        .map_err(xml_err)?;
    text_element(&mut writer, "name", &name)?;
    text_element(
        &mut writer,
        "desc",
        &format!("Cruise altitude {:.0} ft", request.cruise_altitude_ft),
    )?;

    for (i, leg) in route.legs.iter().enumerate() {
        let altitude_ft = if leg.is_airport() {
            leg.pos.alt_ft
        } else {
            route.leg_altitude(i) as f64
        };
        writer
            .write_event(Event::Start(point_start("rtept", leg.pos.lat, leg.pos.lon)))
            .map_err(xml_err)?;
        text_element(&mut writer, "ele", &format!("{:.1}", altitude_ft * FEET_TO_METERS))?;
        text_element(&mut writer, "name", &leg.route_token())?;
        text_element(&mut writer, "desc", waypoint_desc(leg.waypoint_type))?;
        writer
            .write_event(Event::End(BytesEnd::new("rtept")))
            .map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("rte")))
        .map_err(xml_err)?;

    if !request.track.is_empty() {
        writer
            .write_event(Event::Start(BytesStart::new("trk")))
            .map_err(xml_err)?;
        text_element(&mut writer, "name", &format!("Track {}", name))?;
        writer
            .write_event(Event::Start(BytesStart::new("trkseg")))
            .map_err(xml_err)?;

        for point in request.track {
            let time = DateTime::from_timestamp(i64::from(point.timestamp), 0).ok_or_else(|| {
                NativeWriteError::Format(format!("Invalid track timestamp {}", point.timestamp))
            })?;
            writer
                .write_event(Event::Start(point_start("trkpt", point.pos.lat, point.pos.lon)))
                .map_err(xml_err)?;
            text_element(&mut writer, "ele", &format!("{:.1}", point.pos.alt_ft * FEET_TO_METERS))?;
            text_element(&mut writer, "time", &time.to_rfc3339_opts(SecondsFormat::Secs, true))?;
            writer
                .write_event(Event::End(BytesEnd::new("trkpt")))
                .map_err(xml_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("trkseg")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("trk")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("gpx")))
        .map_err(xml_err)?;

    let mut cursor = writer.into_inner();
    cursor.write_all(b"\n")?;
    Ok(cursor.into_inner())
}
