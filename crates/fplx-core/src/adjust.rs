// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::route::{FlightplanEntry, LegType, ProcedureKind, Route, WaypointType};

/// Toggles for [`Route::adjusted_to_procedure_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjustOptions {
    /// Write approach fixes as plain waypoints instead of referencing the approach.
    pub keep_approach_waypoints: bool,
    /// Write SID and STAR fixes as plain waypoints instead of referencing the procedures.
    pub keep_sid_star_waypoints: bool,
    /// Turn fixes without a charted ident into user waypoints.
    pub replace_custom_waypoints: bool,
    pub remove_alternates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcedureAction {
    Collapse,
    Materialize,
}

impl Route {
    /// Returns the route variant that format encoders consume.
    pub fn adjusted_to_procedure_options(&self, options: AdjustOptions) -> Route {
        let action = |kind: ProcedureKind| {
            let custom = self.procedure(kind).is_some_and(|p| p.custom);
            let keep = match kind {
                ProcedureKind::Sid | ProcedureKind::Star => options.keep_sid_star_waypoints,
                ProcedureKind::Approach => options.keep_approach_waypoints,
            };
            if keep || (custom && options.replace_custom_waypoints) {
                ProcedureAction::Materialize
            } else {
                ProcedureAction::Collapse
            }
        };

        // Legs representing a collapsed procedure: SID end fix, STAR and approach entry fixes
        let keeper = |kind: ProcedureKind| {
            let mut legs = self
                .legs
                .iter()
                .enumerate()
                .filter(|(_, l)| l.procedure == Some(kind))
                .map(|(i, _)| i);
            match kind {
                ProcedureKind::Sid => legs.last(),
                ProcedureKind::Star | ProcedureKind::Approach => legs.next(),
            }
        };
        let keepers = [
            keeper(ProcedureKind::Sid),
            keeper(ProcedureKind::Star),
            keeper(ProcedureKind::Approach),
        ];

        let mut legs = Vec::with_capacity(self.legs.len());
        let mut index_map: Vec<Option<usize>> = Vec::with_capacity(self.legs.len());

        for (i, leg) in self.legs.iter().enumerate() {
            if options.remove_alternates && self.is_alternate(i) {
                index_map.push(None);
                continue;
            }

            let adjusted = match leg.procedure {
                Some(kind) => match action(kind) {
                    ProcedureAction::Materialize => Some(materialize(leg)),
                    ProcedureAction::Collapse if keepers.contains(&Some(i)) => {
                        Some(replace_custom(leg.clone(), options.replace_custom_waypoints))
                    }
                    ProcedureAction::Collapse => None,
                },
                None => Some(replace_custom(leg.clone(), options.replace_custom_waypoints)),
            };

            match adjusted {
                Some(leg) => {
                    index_map.push(Some(legs.len()));
                    legs.push(leg);
                }
                None => index_map.push(None),
            }
        }

        let remap = |index: Option<usize>| index.and_then(|i| index_map.get(i).copied().flatten());

        let mut route = self.clone();
        route.departure_index = remap(self.departure_index);
        route.destination_index = remap(self.destination_index);
        route.alternate_indices = self
            .alternate_indices
            .iter()
            .filter_map(|&i| remap(Some(i)))
            .collect();
        route
            .procedures
            .retain(|p| action(p.kind) == ProcedureAction::Collapse);
        route.legs = legs;

        route.update_airways_and_altitude();

        log::debug!(
            "Adjusted route {} -> {}: {} of {} legs kept, {} procedures referenced",
            route.departure_ident(),
            route.destination_ident(),
            route.legs.len(),
            self.legs.len(),
            route.procedures.len()
        );
        route
    }
}

/// Turns a procedure leg into a plain enroute waypoint.
fn materialize(leg: &FlightplanEntry) -> FlightplanEntry {
    let mut entry = leg.clone();
    if entry.leg_type == LegType::Custom || entry.ident.is_empty() {
        entry.waypoint_type = WaypointType::User;
        if entry.ident.is_empty() {
            entry.ident = entry.pos.to_icao_coords();
        }
    }
    entry.procedure = None;
    entry.airway = None;
    entry.leg_type = LegType::Direct;
    entry
}

fn replace_custom(mut entry: FlightplanEntry, enabled: bool) -> FlightplanEntry {
    if enabled && entry.ident.is_empty() && !entry.is_airport() {
        entry.waypoint_type = WaypointType::User;
        entry.ident = entry.pos.to_icao_coords();
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::tests::{airport, fix, via};
    use crate::route::{AirwayKind, Procedure};

    fn proc_leg(ident: &str, lat: f64, lon: f64, kind: ProcedureKind) -> FlightplanEntry {
        let mut leg = fix(ident, lat, lon);
        leg.procedure = Some(kind);
        leg.leg_type = LegType::Procedure;
        leg
    }

    fn procedure(kind: ProcedureKind, name: &str) -> Procedure {
        Procedure {
            kind,
            name: name.to_string(),
            transition: None,
            runway: None,
            custom: false,
        }
    }

    /// EGLL 27L BPK7G to BPK, CLN UL620 REDFA, REDF1A, I18R into EHAM, alternates EHRD and EHEH.
    fn route_with_procedures() -> Route {
        let mut route = Route::new(
            vec![
                airport("EGLL", 51.47, -0.46, 83.0),
                proc_leg("BUR", 51.50, -0.70, ProcedureKind::Sid),
                proc_leg("BPK", 51.75, -0.11, ProcedureKind::Sid),
                fix("CLN", 51.85, 1.15),
                via(fix("REDFA", 52.10, 3.00), "UL620", AirwayKind::Jet),
                proc_leg("REDFA", 52.10, 3.00, ProcedureKind::Star),
                proc_leg("ARTIP", 52.51, 5.57, ProcedureKind::Star),
                proc_leg("SPL", 52.33, 4.75, ProcedureKind::Approach),
                proc_leg("CI18R", 52.40, 4.71, ProcedureKind::Approach),
                airport("EHAM", 52.31, 4.76, -11.0),
                airport("EHRD", 51.96, 4.44, -15.0),
                airport("EHEH", 51.45, 5.37, 74.0),
            ],
            25000.0,
        );
        route.destination_index = Some(9);
        route.alternate_indices = vec![10, 11];
        route.procedures = vec![
            procedure(ProcedureKind::Sid, "BPK7G"),
            procedure(ProcedureKind::Star, "REDF1A"),
            procedure(ProcedureKind::Approach, "I18R"),
        ];
        route.update_airways_and_altitude();
        route
    }

    #[test]
    fn test_remove_alternates() {
        let route = route_with_procedures();
        let options = AdjustOptions {
            keep_approach_waypoints: true,
            keep_sid_star_waypoints: true,
            replace_custom_waypoints: false,
            remove_alternates: true,
        };
        let adjusted = route.adjusted_to_procedure_options(options);

        assert_eq!(adjusted.legs.len(), route.legs.len() - 2);
        assert_eq!(adjusted.legs.last(), route.destination_leg());
        assert_eq!(adjusted.destination_index, Some(adjusted.legs.len() - 1));
        assert!(adjusted.alternate_indices.is_empty());
        assert_eq!(adjusted.cruising_altitude_ft, route.cruising_altitude_ft);
    }

    #[test]
    fn test_keep_alternates() {
        let route = route_with_procedures();
        let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
            keep_approach_waypoints: true,
            keep_sid_star_waypoints: true,
            ..Default::default()
        });
        assert_eq!(adjusted.legs.len(), route.legs.len());
        assert_eq!(adjusted.alternate_idents(), vec!["EHRD", "EHEH"]);
    }

    #[test]
    fn test_collapse_procedures() {
        let route = route_with_procedures();
        let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
            remove_alternates: true,
            ..Default::default()
        });

        let idents: Vec<&str> = adjusted.legs.iter().map(|l| l.ident.as_str()).collect();
        assert_eq!(idents, vec!["EGLL", "BPK", "CLN", "REDFA", "REDFA", "SPL", "EHAM"]);
        assert_eq!(adjusted.procedures.len(), 3);
        assert_eq!(adjusted.destination_index, Some(6));
        assert_eq!(adjusted.departure_index, Some(0));
    }

    #[test]
    fn test_materialize_sid_star() {
        let route = route_with_procedures();
        let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
            keep_sid_star_waypoints: true,
            remove_alternates: true,
            ..Default::default()
        });

        assert!(adjusted.procedure(ProcedureKind::Sid).is_none());
        assert!(adjusted.procedure(ProcedureKind::Star).is_none());
        assert!(adjusted.procedure(ProcedureKind::Approach).is_some());
        assert!(adjusted
            .legs
            .iter()
            .all(|l| !matches!(l.procedure, Some(ProcedureKind::Sid | ProcedureKind::Star))));
        // BUR, BPK, REDFA and ARTIP are now enroute fixes, approach collapsed to SPL
        assert_eq!(adjusted.legs.len(), 9);
        assert_eq!(adjusted.legs[7].ident, "SPL");
    }

    #[test]
    fn test_replace_custom_procedure() {
        let mut route = route_with_procedures();
        route.procedures[0].custom = true;
        route.legs[1].ident.clear();
        route.legs[1].leg_type = LegType::Custom;

        let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
            replace_custom_waypoints: true,
            remove_alternates: true,
            ..Default::default()
        });

        assert!(adjusted.procedure(ProcedureKind::Sid).is_none());
        assert_eq!(adjusted.legs[1].waypoint_type, WaypointType::User);
        assert_eq!(adjusted.legs[1].ident, "5130N00042W");
        assert_eq!(adjusted.legs[2].ident, "BPK");
        assert_eq!(adjusted.legs[2].procedure, None);
    }

    #[test]
    fn test_airway_annotations_recomputed() {
        let route = route_with_procedures();
        let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
            remove_alternates: true,
            ..Default::default()
        });
        assert_eq!(adjusted.jet_airway_flags().len(), adjusted.legs.len());
        assert!(adjusted.jet_airway_flags()[3]);
        assert_eq!(adjusted.altitude_profile().len(), adjusted.legs.len());
    }
}
