// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

/// Climb gradient used for the leg altitude profile.
const CLIMB_FT_PER_NM: f64 = 300.0;
/// Three degree descent.
const DESCENT_FT_PER_NM: f64 = 318.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub alt_ft: f64,
}

impl Pos {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            alt_ft: 0.0,
        }
    }

    pub fn distance_nm(&self, other: &Pos) -> f64 {
        let r_nm = 3440.06;
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        r_nm * c
    }

    /// ICAO flight plan coordinate token with whole minutes, e.g. `4529N11116W`.
    pub fn to_icao_coords(&self) -> String {
        let (lat_deg, lat_min) = deg_min(self.lat.abs(), 60.0);
        let (lon_deg, lon_min) = deg_min(self.lon.abs(), 60.0);
        format!(
            "{:02}{:02}{}{:03}{:02}{}",
            lat_deg,
            lat_min,
            if self.lat < 0.0 { 'S' } else { 'N' },
            lon_deg,
            lon_min,
            if self.lon < 0.0 { 'W' } else { 'E' }
        )
    }

    /// Garmin user waypoint coordinates with tenths of minutes, e.g. `N47123W122456`.
    pub fn to_garmin_coords(&self) -> String {
        let (lat_deg, lat_tenths) = deg_min(self.lat.abs(), 600.0);
        let (lon_deg, lon_tenths) = deg_min(self.lon.abs(), 600.0);
        format!(
            "{}{:02}{:03}{}{:03}{:03}",
            if self.lat < 0.0 { 'S' } else { 'N' },
            lat_deg,
            lat_tenths,
            if self.lon < 0.0 { 'W' } else { 'E' },
            lon_deg,
            lon_tenths
        )
    }
}

/// Splits an absolute angle into whole degrees and rounded fractions of a degree
/// (`per_degree` fractions make up one degree).
fn deg_min(value: f64, per_degree: f64) -> (u32, u32) {
    let mut deg = value.trunc() as u32;
    let mut frac = ((value - value.trunc()) * per_degree).round() as u32;
    if frac >= per_degree as u32 {
        deg += 1;
        frac = 0;
    }
    (deg, frac)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightplanType {
    #[default]
    Ifr,
    Vfr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointType {
    Airport,
    Vor,
    Ndb,
    #[default]
    Waypoint,
    /// Not in any navigation database, only known by position.
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegType {
    Airway,
    #[default]
    Direct,
    Procedure,
    /// Fix of a user-defined procedure.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirwayKind {
    #[default]
    Victor,
    Jet,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airway {
    pub name: String,
    #[serde(default)]
    pub kind: AirwayKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Sid,
    Star,
    Approach,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub kind: ProcedureKind,
    pub name: String,
    #[serde(default)]
    pub transition: Option<String>,
    #[serde(default)]
    pub runway: Option<String>,
    /// User-defined procedure that third-party software cannot resolve by name.
    #[serde(default)]
    pub custom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightplanEntry {
    pub ident: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub name: String,
    pub pos: Pos,
    #[serde(default)]
    pub waypoint_type: WaypointType,
    #[serde(default)]
    pub leg_type: LegType,
    /// Airway flown to reach this entry from the previous one.
    #[serde(default)]
    pub airway: Option<Airway>,
    #[serde(default)]
    pub procedure: Option<ProcedureKind>,
}

impl FlightplanEntry {
    pub fn is_airport(&self) -> bool {
        self.waypoint_type == WaypointType::Airport
    }

    /// Token used in route strings. User waypoints have no ident other
    /// software can resolve, so they are written as coordinates.
    pub fn route_token(&self) -> String {
        if self.waypoint_type == WaypointType::User || self.ident.is_empty() {
            self.pos.to_icao_coords()
        } else {
            self.ident.clone()
        }
    }
}

/// Aircraft track sample. Timestamp is seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub pos: Pos,
    pub timestamp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<FlightplanEntry>,
    #[serde(default)]
    pub departure_index: Option<usize>,
    #[serde(default)]
    pub destination_index: Option<usize>,
    #[serde(default)]
    pub alternate_indices: Vec<usize>,
    pub cruising_altitude_ft: f32,
    #[serde(default)]
    pub flightplan_type: FlightplanType,
    #[serde(default)]
    pub departure_name: Option<String>,
    #[serde(default)]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub procedures: Vec<Procedure>,
    #[serde(default)]
    pub departure_has_parking: bool,
    #[serde(default)]
    pub departure_parking: Option<String>,
    #[serde(skip)]
    altitudes: Vec<f32>,
    #[serde(skip)]
    jet_airway_flags: Vec<bool>,
}

impl Route {
    pub fn new(legs: Vec<FlightplanEntry>, cruising_altitude_ft: f32) -> Self {
        let mut route = Self {
            departure_index: None,
            destination_index: None,
            alternate_indices: Vec::new(),
            cruising_altitude_ft,
            flightplan_type: FlightplanType::Ifr,
            departure_name: None,
            destination_name: None,
            procedures: Vec::new(),
            departure_has_parking: false,
            departure_parking: None,
            altitudes: Vec::new(),
            jet_airway_flags: Vec::new(),
            legs,
        };
        if route.legs.first().is_some_and(FlightplanEntry::is_airport) {
            route.departure_index = Some(0);
        }
        if route.legs.len() > 1 && route.legs.last().is_some_and(FlightplanEntry::is_airport) {
            route.destination_index = Some(route.legs.len() - 1);
        }
        route.update_airways_and_altitude();
        route
    }

    /// Loads a route snapshot and recomputes the derived leg annotations.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut route: Route = serde_json::from_str(json)?;
        route.update_airways_and_altitude();
        Ok(route)
    }

    pub fn departure_leg(&self) -> Option<&FlightplanEntry> {
        self.departure_index.and_then(|i| self.legs.get(i))
    }

    pub fn destination_leg(&self) -> Option<&FlightplanEntry> {
        self.destination_index.and_then(|i| self.legs.get(i))
    }

    pub fn has_valid_departure(&self) -> bool {
        self.departure_leg().is_some_and(FlightplanEntry::is_airport)
    }

    pub fn has_valid_destination(&self) -> bool {
        self.destination_leg().is_some_and(FlightplanEntry::is_airport)
    }

    /// True unless the departure airport has parking spots and none was selected.
    pub fn has_valid_parking(&self) -> bool {
        !self.departure_has_parking || self.departure_parking.is_some()
    }

    pub fn departure_ident(&self) -> &str {
        self.departure_leg().map_or("", |l| l.ident.as_str())
    }

    pub fn destination_ident(&self) -> &str {
        self.destination_leg().map_or("", |l| l.ident.as_str())
    }

    pub fn alternate_idents(&self) -> Vec<&str> {
        self.alternate_indices
            .iter()
            .filter_map(|&i| self.legs.get(i))
            .map(|l| l.ident.as_str())
            .collect()
    }

    pub fn procedure(&self, kind: ProcedureKind) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.kind == kind)
    }

    pub fn is_alternate(&self, index: usize) -> bool {
        self.alternate_indices.contains(&index)
    }

    /// One flag per leg, set when the leg is reached via a jet or mixed level airway.
    pub fn jet_airway_flags(&self) -> &[bool] {
        &self.jet_airway_flags
    }

    /// Profile altitude of every leg in feet.
    pub fn altitude_profile(&self) -> &[f32] {
        &self.altitudes
    }

    pub fn leg_altitude(&self, index: usize) -> f32 {
        self.altitudes
            .get(index)
            .copied()
            .unwrap_or(self.cruising_altitude_ft)
    }

    /// Index range of legs between departure and destination, both inclusive.
    /// Falls back to all non-alternate legs when an endpoint is missing.
    fn main_range(&self) -> (usize, usize) {
        let len = self.legs.len();
        let start = self.departure_index.filter(|&i| i < len).unwrap_or(0);
        let end = match self.destination_index.filter(|&i| i < len) {
            Some(dest) => dest,
            None => (0..len)
                .rev()
                .find(|i| !self.is_alternate(*i))
                .unwrap_or(0),
        };
        (start, end.max(start))
    }

    pub fn total_distance_nm(&self) -> f64 {
        let (start, end) = self.main_range();
        if self.legs.is_empty() {
            return 0.0;
        }
        self.legs[start..=end.min(self.legs.len() - 1)]
            .windows(2)
            .map(|w| w[0].pos.distance_nm(&w[1].pos))
            .sum()
    }

    /// Recomputes airway continuity, jet airway flags and the leg altitude
    /// profile from the current leg sequence. Cruise altitude is not touched.
    pub fn update_airways_and_altitude(&mut self) {
        for i in 0..self.legs.len() {
            let prev_ok = i > 0 && !self.legs[i - 1].is_airport() && !self.is_alternate(i);
            let leg = &mut self.legs[i];
            if leg.airway.is_some() && (!prev_ok || leg.is_airport() || leg.procedure.is_some()) {
                leg.airway = None;
                if leg.leg_type == LegType::Airway {
                    leg.leg_type = LegType::Direct;
                }
            } else if leg.airway.is_some() {
                leg.leg_type = LegType::Airway;
            } else if leg.leg_type == LegType::Airway {
                leg.leg_type = LegType::Direct;
            }
        }

        self.jet_airway_flags = self
            .legs
            .iter()
            .map(|l| {
                l.airway
                    .as_ref()
                    .is_some_and(|a| matches!(a.kind, AirwayKind::Jet | AirwayKind::Both))
            })
            .collect();

        self.altitudes = self.compute_altitude_profile();
    }

    fn compute_altitude_profile(&self) -> Vec<f32> {
        let cruise = self.cruising_altitude_ft as f64;
        let mut altitudes = vec![self.cruising_altitude_ft; self.legs.len()];
        if self.legs.is_empty() {
            return altitudes;
        }

        let (start, end) = self.main_range();
        let end = end.min(self.legs.len() - 1);

        let mut from_start = vec![0.0; self.legs.len()];
        for i in start + 1..=end {
            from_start[i] = from_start[i - 1] + self.legs[i - 1].pos.distance_nm(&self.legs[i].pos);
        }
        let total = from_start[end];

        let dep_elev = if self.has_valid_departure() {
            self.legs[start].pos.alt_ft
        } else {
            cruise
        };
        let dest_elev = if self.has_valid_destination() {
            self.legs[end].pos.alt_ft
        } else {
            cruise
        };

        for i in start..=end {
            let climb = dep_elev + CLIMB_FT_PER_NM * from_start[i];
            let descent = dest_elev + DESCENT_FT_PER_NM * (total - from_start[i]);
            altitudes[i] = cruise.min(climb).min(descent).max(0.0) as f32;
        }

        for &i in &self.alternate_indices {
            if let Some(leg) = self.legs.get(i) {
                altitudes[i] = leg.pos.alt_ft as f32;
            }
        }
        altitudes
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn airport(ident: &str, lat: f64, lon: f64, elev: f64) -> FlightplanEntry {
        FlightplanEntry {
            ident: ident.to_string(),
            region: String::new(),
            name: String::new(),
            pos: Pos {
                lat,
                lon,
                alt_ft: elev,
            },
            waypoint_type: WaypointType::Airport,
            leg_type: LegType::Direct,
            airway: None,
            procedure: None,
        }
    }

    pub fn fix(ident: &str, lat: f64, lon: f64) -> FlightplanEntry {
        FlightplanEntry {
            ident: ident.to_string(),
            region: String::new(),
            name: String::new(),
            pos: Pos::new(lat, lon),
            waypoint_type: WaypointType::Waypoint,
            leg_type: LegType::Direct,
            airway: None,
            procedure: None,
        }
    }

    pub fn via(mut entry: FlightplanEntry, airway: &str, kind: AirwayKind) -> FlightplanEntry {
        entry.airway = Some(Airway {
            name: airway.to_string(),
            kind,
        });
        entry.leg_type = LegType::Airway;
        entry
    }

    #[test]
    fn test_icao_coords() {
        let pos = Pos::new(45.4833, -111.2667);
        assert_eq!(pos.to_icao_coords(), "4529N11116W");

        let south_east = Pos::new(-33.95, 151.1833);
        assert_eq!(south_east.to_icao_coords(), "3357S15111E");

        // Minutes rounding up to a full degree
        let rollover = Pos::new(9.9999, 0.0);
        assert_eq!(rollover.to_icao_coords(), "1000N00000E");
    }

    #[test]
    fn test_garmin_coords() {
        let pos = Pos::new(47.205, -122.76);
        assert_eq!(pos.to_garmin_coords(), "N47123W122456");
    }

    #[test]
    fn test_new_detects_endpoints() {
        let route = Route::new(
            vec![
                airport("KJFK", 40.64, -73.78, 13.0),
                fix("GAYEL", 41.40, -74.35),
                airport("CYYZ", 43.68, -79.63, 569.0),
            ],
            35000.0,
        );
        assert!(route.has_valid_departure());
        assert!(route.has_valid_destination());
        assert_eq!(route.departure_ident(), "KJFK");
        assert_eq!(route.destination_ident(), "CYYZ");
    }

    #[test]
    fn test_airway_from_airport_becomes_direct() {
        let route = Route::new(
            vec![
                airport("KJFK", 40.64, -73.78, 13.0),
                via(fix("GAYEL", 41.40, -74.35), "J95", AirwayKind::Jet),
                via(fix("WOZEE", 42.93, -77.70), "Q818", AirwayKind::Jet),
                airport("CYYZ", 43.68, -79.63, 569.0),
            ],
            35000.0,
        );
        assert!(route.legs[1].airway.is_none());
        assert_eq!(route.legs[1].leg_type, LegType::Direct);
        assert_eq!(route.legs[2].leg_type, LegType::Airway);
        assert_eq!(route.jet_airway_flags(), &[false, false, true, false]);
    }

    #[test]
    fn test_altitude_profile_is_capped_by_cruise() {
        let route = Route::new(
            vec![
                airport("EDDF", 50.03, 8.57, 364.0),
                fix("ABC", 50.50, 9.00),
                fix("DEF", 52.00, 9.50),
                airport("EDDH", 53.63, 9.99, 53.0),
            ],
            24000.0,
        );
        let profile = route.altitude_profile();
        assert_eq!(profile.len(), 4);
        assert!((profile[0] - 364.0).abs() < 1.0);
        assert!((profile[3] - 53.0).abs() < 1.0);
        assert!(profile.iter().all(|a| *a <= 24000.0));
        assert!(profile[2] > profile[0]);
        assert_eq!(route.cruising_altitude_ft, 24000.0);
    }

    #[test]
    fn test_parking_validation() {
        let mut route = Route::new(vec![airport("EDDF", 50.03, 8.57, 364.0)], 5000.0);
        assert!(route.has_valid_parking());
        route.departure_has_parking = true;
        assert!(!route.has_valid_parking());
        route.departure_parking = Some("V155".to_string());
        assert!(route.has_valid_parking());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "legs": [
                {"ident": "KDSM", "pos": {"lat": 41.53, "lon": -93.66, "alt_ft": 958}, "waypoint_type": "airport"},
                {"ident": "DSM", "pos": {"lat": 41.43, "lon": -93.64}, "waypoint_type": "vor"},
                {"ident": "TUL", "pos": {"lat": 36.19, "lon": -95.79}, "waypoint_type": "vor",
                 "airway": {"name": "J25", "kind": "jet"}},
                {"ident": "KOKC", "pos": {"lat": 35.39, "lon": -97.60, "alt_ft": 1295}, "waypoint_type": "airport"}
            ],
            "departure_index": 0,
            "destination_index": 3,
            "cruising_altitude_ft": 33000,
            "flightplan_type": "IFR"
        }"#;
        let route = Route::from_json(json).unwrap();
        assert_eq!(route.legs.len(), 4);
        assert_eq!(route.legs[2].leg_type, LegType::Airway);
        assert_eq!(route.altitude_profile().len(), 4);
        assert!(route.jet_airway_flags()[2]);
    }
}
