// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::formats::ExportFormat;
use crate::route::{FlightplanType, Route};
use crate::route_string::{route_string, RouteStringOptions};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Aircraft performance figures the exporter reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftPerformance {
    #[serde(default)]
    pub aircraft_type: String,
    #[serde(default)]
    pub cruise_speed_kts: f32,
    #[serde(default)]
    pub average_ground_speed_kts: f32,
    #[serde(default)]
    pub travel_time_hours: f32,
}

/// ATC filing data for the vPilot and IvAp dialects. Built per export and
/// handed to the UI for editing before encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub callsign: String,
    pub pilot_in_command: String,
    pub airline: String,
    pub livery: String,
    pub aircraft_type: String,
    pub equipment: String,
    pub equipment_prefix: String,
    pub equipment_suffix: String,
    pub wake_category: String,
    pub transponder: String,
    pub passengers: u32,
    pub remarks: String,
    pub departure_time: NaiveTime,
    /// `None` is written as `0` by vPilot.
    pub departure_time_actual: Option<NaiveTime>,
    pub enroute_minutes: u32,
    pub endurance_minutes: u32,
    pub voice_type: String,
    pub is_heavy: bool,
    /// `IFR`/`VFR` for vPilot, `I`/`V` for IvAp.
    pub flight_rules: String,
    pub flight_type: String,
    pub speed: u32,
    pub cruise_altitude: i32,
    pub departure: String,
    pub destination: String,
    pub alternate: String,
    pub alternate2: String,
    pub route: String,
}

impl ExportMetadata {
    /// Defaults from the current route and performance. `now` is the current UTC time.
    pub fn from_route(
        route: &Route,
        performance: &AircraftPerformance,
        format: ExportFormat,
        now: NaiveTime,
    ) -> Self {
        let alternates = route.alternate_idents();
        let ifr = route.flightplan_type == FlightplanType::Ifr;
        let flight_rules = match format {
            ExportFormat::Vfp => if ifr { "IFR" } else { "VFR" },
            ExportFormat::Ivap | ExportFormat::XIvap => if ifr { "I" } else { "V" },
            _ => "",
        };
        let enroute_minutes = (performance.travel_time_hours * 60.0).round().max(0.0) as u32;

        Self {
            route: route_string(
                route,
                0.0,
                RouteStringOptions {
                    sid_star: true,
                    ..RouteStringOptions::NONE
                },
            ),
            departure: route.departure_ident().to_string(),
            destination: route.destination_ident().to_string(),
            alternate: alternates.first().map(|s| s.to_string()).unwrap_or_default(),
            alternate2: alternates.get(1).map(|s| s.to_string()).unwrap_or_default(),
            departure_time: now,
            departure_time_actual: Some(now),
            cruise_altitude: route.cruising_altitude_ft.round() as i32,
            flight_rules: flight_rules.to_string(),
            aircraft_type: performance.aircraft_type.clone(),
            speed: performance.cruise_speed_kts.round().max(0.0) as u32,
            enroute_minutes,
            endurance_minutes: enroute_minutes + 60,
            ..Default::default()
        }
    }
}
