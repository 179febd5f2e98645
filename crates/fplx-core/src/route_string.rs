// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Route strings like `EDDF N0450F350 SOBRA1L.SOBRA Y180 DIK DCT EDDH FL350`
//! as understood by flight simulator addons and online ATC clients.

use crate::route::{FlightplanEntry, ProcedureKind, Route, WaypointType};

/// Formatting switches for [`route_tokens`]. Combine presets with struct update syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStringOptions {
    /// Emit `DCT` before fixes reached directly.
    pub dct: bool,
    pub start_and_dest: bool,
    /// Emit SID and STAR names.
    pub sid_star: bool,
    /// Emit the literals `SID` and `STAR` instead of procedure names.
    pub sid_star_generic: bool,
    /// Separate procedure name and transition fix by a space instead of a dot.
    pub sid_star_space: bool,
    /// Departure runway after the departure ident.
    pub runway: bool,
    pub approach: bool,
    /// Never write `DCT` directly before the destination.
    pub no_final_dct: bool,
    pub flight_level: bool,
    pub alternates: bool,
}

impl RouteStringOptions {
    pub const NONE: Self = Self {
        dct: false,
        start_and_dest: false,
        sid_star: false,
        sid_star_generic: false,
        sid_star_space: false,
        runway: false,
        approach: false,
        no_final_dct: false,
        flight_level: false,
        alternates: false,
    };
}

/// Indices of the legs written between departure and destination.
fn enroute_indices(route: &Route) -> impl Iterator<Item = usize> + '_ {
    let len = route.legs.len();
    let start = match route.departure_index {
        Some(i) if route.has_valid_departure() => i + 1,
        _ => 0,
    };
    let end = match route.destination_index {
        Some(i) if route.has_valid_destination() => i,
        _ => route
            .alternate_indices
            .iter()
            .copied()
            .filter(|&i| i < len)
            .min()
            .unwrap_or(len),
    };
    (start..end.max(start)).filter(move |&i| {
        !route.is_alternate(i) && route.legs[i].procedure.is_none()
    })
}

/// Transition fix of a collapsed SID (last leg) or STAR (first leg).
fn transition_fix(route: &Route, kind: ProcedureKind) -> Option<&FlightplanEntry> {
    let mut legs = route.legs.iter().filter(|l| l.procedure == Some(kind));
    match kind {
        ProcedureKind::Sid => legs.last(),
        _ => legs.next(),
    }
}

/// Builds the token list for `route`. A `speed_kts` above zero adds the ICAO
/// speed and level group after the departure.
pub fn route_tokens(route: &Route, speed_kts: f32, options: RouteStringOptions) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let sid = route.procedure(ProcedureKind::Sid);
    let star = route.procedure(ProcedureKind::Star);

    if options.start_and_dest && route.has_valid_departure() {
        tokens.push(route.departure_ident().to_string());
        if options.runway {
            if let Some(rwy) = sid.and_then(|p| p.runway.as_deref()) {
                tokens.push(rwy.to_string());
            }
        }
    }

    if speed_kts > 0.0 {
        tokens.push(format!(
            "N{:04}F{:03}",
            speed_kts.round() as u32,
            (route.cruising_altitude_ft / 100.0).round() as u32
        ));
    }

    let label = |name: &str, generic: &'static str| {
        if options.sid_star_generic {
            Some(generic.to_string())
        } else if options.sid_star {
            Some(name.to_string())
        } else {
            None
        }
    };
    let separate = options.sid_star_generic || options.sid_star_space;

    if let (Some(sid), Some(fix)) = (sid, transition_fix(route, ProcedureKind::Sid)) {
        match label(&sid.name, "SID") {
            Some(label) if separate => tokens.extend([label, fix.route_token()]),
            Some(label) => tokens.push(format!("{}.{}", label, fix.route_token())),
            None => tokens.push(fix.route_token()),
        }
    }

    let mut last_airway: Option<&str> = None;
    for i in enroute_indices(route) {
        let leg = &route.legs[i];
        match leg.airway.as_ref() {
            Some(airway) => {
                if last_airway == Some(airway.name.as_str()) {
                    tokens.pop();
                } else {
                    tokens.push(airway.name.clone());
                }
                last_airway = Some(airway.name.as_str());
            }
            None => {
                if options.dct {
                    tokens.push("DCT".to_string());
                }
                last_airway = None;
            }
        }
        tokens.push(leg.route_token());
    }

    if let (Some(star), Some(fix)) = (star, transition_fix(route, ProcedureKind::Star)) {
        match label(&star.name, "STAR") {
            Some(label) if separate => tokens.extend([fix.route_token(), label]),
            Some(label) => tokens.push(format!("{}.{}", label, fix.route_token())),
            None => tokens.push(fix.route_token()),
        }
    } else if options.dct
        && !options.no_final_dct
        && options.start_and_dest
        && route.has_valid_destination()
    {
        tokens.push("DCT".to_string());
    }

    if options.start_and_dest && route.has_valid_destination() {
        tokens.push(route.destination_ident().to_string());
        if options.approach {
            if let Some(approach) = route.procedure(ProcedureKind::Approach) {
                tokens.push(approach.name.clone());
                if let Some(transition) = &approach.transition {
                    tokens.push(transition.clone());
                }
            }
        }
    }

    if options.alternates {
        tokens.extend(route.alternate_idents().into_iter().map(str::to_string));
    }

    if options.flight_level {
        tokens.push(format!("FL{:03}", (route.cruising_altitude_ft / 100.0).round() as u32));
    }

    tokens.dedup();
    tokens
}

pub fn route_string(route: &Route, speed_kts: f32, options: RouteStringOptions) -> String {
    route_tokens(route, speed_kts, options).join(" ")
}

#[derive(Debug)]
enum GfpGroup {
    Fix(String),
    Airway {
        entry: String,
        airway: String,
        exit: String,
    },
}

/// Garmin flight plan string, e.g.
/// `FPN/RI:DA:KTEB:D:RUUDY6.WAVEY:R:24:F:COL.V3.SAX:F:KMMU`.
/// With `procedures` unset SID and STAR transition fixes are written as plain
/// fixes. `user_waypoints` writes user waypoint idents instead of coordinates.
pub fn gfp_string(route: &Route, procedures: bool, user_waypoints: bool) -> String {
    let ident = |leg: &FlightplanEntry| {
        if leg.waypoint_type == WaypointType::User || leg.ident.is_empty() {
            if user_waypoints && !leg.ident.is_empty() {
                leg.ident.clone()
            } else {
                leg.pos.to_garmin_coords()
            }
        } else {
            leg.ident.clone()
        }
    };

    let sid = route.procedure(ProcedureKind::Sid);
    let star = route.procedure(ProcedureKind::Star);
    let approach = route.procedure(ProcedureKind::Approach);
    let sid_fix = transition_fix(route, ProcedureKind::Sid);
    let star_fix = transition_fix(route, ProcedureKind::Star);

    let mut out: Vec<String> = Vec::new();
    let mut groups: Vec<GfpGroup> = Vec::new();

    if route.has_valid_departure() {
        match (sid, sid_fix) {
            (Some(sid), Some(fix)) if procedures => {
                let mut departure = format!(
                    "DA:{}:D:{}.{}",
                    route.departure_ident(),
                    sid.name,
                    ident(fix)
                );
                if let Some(rwy) = &sid.runway {
                    departure.push_str(&format!(":R:{}", rwy));
                }
                out.push(departure);
            }
            _ => out.push(format!("F:{}", route.departure_ident())),
        }
    }
    if let (false, Some(fix)) = (procedures, sid_fix) {
        groups.push(GfpGroup::Fix(ident(fix)));
    }

    let mut previous: Option<String> = sid_fix.map(ident);
    for i in enroute_indices(route) {
        let leg = &route.legs[i];
        let fix = ident(leg);
        match (leg.airway.as_ref(), previous.take()) {
            (Some(airway), Some(entry)) => {
                let continues = matches!(groups.last(),
                    Some(GfpGroup::Airway { airway: name, .. }) if *name == airway.name);
                if continues {
                    if let Some(GfpGroup::Airway { exit, .. }) = groups.last_mut() {
                        *exit = fix.clone();
                    }
                } else {
                    // Entry fix was written on its own, fold it into the span
                    if matches!(groups.last(), Some(GfpGroup::Fix(last)) if *last == entry) {
                        groups.pop();
                    }
                    groups.push(GfpGroup::Airway {
                        entry,
                        airway: airway.name.clone(),
                        exit: fix.clone(),
                    });
                }
            }
            _ => groups.push(GfpGroup::Fix(fix.clone())),
        }
        previous = Some(fix);
    }

    if let (false, Some(fix)) = (procedures, star_fix) {
        groups.push(GfpGroup::Fix(ident(fix)));
    }

    out.extend(groups.into_iter().map(|g| match g {
        GfpGroup::Fix(fix) => format!("F:{}", fix),
        GfpGroup::Airway {
            entry,
            airway,
            exit,
        } => format!("F:{}.{}.{}", entry, airway, exit),
    }));

    if route.has_valid_destination() {
        let arrival_procedures = procedures && (star.is_some() || approach.is_some());
        if arrival_procedures {
            let mut arrival = format!("AA:{}", route.destination_ident());
            if let (Some(star), Some(fix)) = (star, star_fix) {
                arrival.push_str(&format!(":A:{}.{}", star.name, ident(fix)));
            }
            if let Some(approach) = approach {
                arrival.push_str(&format!(":AP:{}", approach.name));
                if let Some(transition) = &approach.transition {
                    arrival.push_str(&format!(".{}", transition));
                }
            }
            out.push(arrival);
        } else {
            out.push(format!("F:{}", route.destination_ident()));
        }
    }

    format!("FPN/RI:{}", out.join(":"))
}
