// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::NativeRequest;
use crate::route::{FlightplanEntry, LegType, ProcedureKind, WaypointType};

/// Navdata cycle written when the host does not know its own.
const FALLBACK_CYCLE: &str = "1709";

fn entry_type(leg: &FlightplanEntry) -> u8 {
    match leg.waypoint_type {
        WaypointType::Airport => 1,
        WaypointType::Ndb => 2,
        WaypointType::Vor => 3,
        WaypointType::Waypoint if !leg.ident.is_empty() => 11,
        WaypointType::Waypoint | WaypointType::User => 28,
    }
}

/// X-Plane 11 `.fms` file with one line per leg:
/// `<type> <ident> <via> <altitude ft> <lat> <lon>`.
pub fn write_fms11(request: &NativeRequest<'_>) -> String {
    let route = request.route;
    let cycle = if request.cycle.is_empty() {
        FALLBACK_CYCLE
    } else {
        request.cycle.as_str()
    };

    let mut out = String::new();
    out.push_str(&format!("I\n1100 Version\nCYCLE {}\n", cycle));

    let first = route.legs.first();
    let last = route.legs.last();
    if route.has_valid_departure() {
        out.push_str(&format!("ADEP {}\n", route.departure_ident()));
        let sid = route.procedure(ProcedureKind::Sid);
        if let Some(rwy) = sid.and_then(|p| p.runway.as_ref()) {
            out.push_str(&format!("DEPRWY RW{}\n", rwy));
        }
        if let Some(sid) = sid {
            out.push_str(&format!("SID {}\n", sid.name));
        }
    } else if let Some(leg) = first {
        out.push_str(&format!("DEP {}\n", leg.route_token()));
    }

    if route.has_valid_destination() {
        out.push_str(&format!("ADES {}\n", route.destination_ident()));
        if let Some(star) = route.procedure(ProcedureKind::Star) {
            out.push_str(&format!("STAR {}\n", star.name));
        }
        if let Some(approach) = route.procedure(ProcedureKind::Approach) {
            out.push_str(&format!("APP {}\n", approach.name));
        }
    } else if let Some(leg) = last {
        out.push_str(&format!("DES {}\n", leg.route_token()));
    }

    out.push_str(&format!("NUMENR {}\n", route.legs.len()));

    for (i, leg) in route.legs.iter().enumerate() {
        let via = if Some(i) == route.departure_index && leg.is_airport() {
            "ADEP".to_string()
        } else if Some(i) == route.destination_index && leg.is_airport() {
            "ADES".to_string()
        } else {
            match (&leg.airway, leg.leg_type) {
                (Some(airway), LegType::Airway) => airway.name.clone(),
                _ => "DRCT".to_string(),
            }
        };
        let altitude = if leg.is_airport() {
            leg.pos.alt_ft
        } else {
            route.leg_altitude(i) as f64
        };
        out.push_str(&format!(
            "{} {} {} {:.6} {:.6} {:.6}\n",
            entry_type(leg),
            leg.route_token(),
            via,
            altitude,
            leg.pos.lat,
            leg.pos.lon
        ));
    }
    out
}
