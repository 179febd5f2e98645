// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use fplx_core::filename::build_short;
use fplx_core::formats::ivap::minutes_to_hhmm;
use fplx_core::formats::text::ufmc_lines;
use fplx_core::route_string::{route_tokens, RouteStringOptions};
use fplx_core::{AdjustOptions, Route};

/// EGLL to EHAM with a SID, a STAR and alternates EHRD and EHEH.
const ROUTE_JSON: &str = r#"{
    "legs": [
        {"ident": "EGLL", "pos": {"lat": 51.4775, "lon": -0.4614, "alt_ft": 83.0}, "waypoint_type": "airport"},
        {"ident": "D254H", "pos": {"lat": 51.44, "lon": -0.62}, "procedure": "sid"},
        {"ident": "BPK", "pos": {"lat": 51.7497, "lon": -0.1067}, "waypoint_type": "vor", "procedure": "sid"},
        {"ident": "CLN", "pos": {"lat": 51.8486, "lon": 1.1472}, "waypoint_type": "vor"},
        {"ident": "REDFA", "pos": {"lat": 52.0528, "lon": 3.0000}, "airway": {"name": "UL620", "kind": "jet"}},
        {"ident": "REDFA", "pos": {"lat": 52.0528, "lon": 3.0000}, "procedure": "star"},
        {"ident": "ARTIP", "pos": {"lat": 52.5117, "lon": 5.5697}, "procedure": "star"},
        {"ident": "EHAM", "pos": {"lat": 52.3086, "lon": 4.7639, "alt_ft": -11.0}, "waypoint_type": "airport"},
        {"ident": "EHRD", "pos": {"lat": 51.9569, "lon": 4.4372, "alt_ft": -15.0}, "waypoint_type": "airport"},
        {"ident": "EHEH", "pos": {"lat": 51.4500, "lon": 5.3747, "alt_ft": 74.0}, "waypoint_type": "airport"}
    ],
    "departure_index": 0,
    "destination_index": 7,
    "alternate_indices": [8, 9],
    "cruising_altitude_ft": 25000.0,
    "procedures": [
        {"kind": "sid", "name": "BPK7G", "runway": "27L"},
        {"kind": "star", "name": "REDF1A"}
    ]
}"#;

fn all_option_sets() -> Vec<RouteStringOptions> {
    let mut sets = Vec::new();
    for bits in 0u16..(1 << 10) {
        let flag = |n: u16| bits & (1 << n) != 0;
        sets.push(RouteStringOptions {
            dct: flag(0),
            start_and_dest: flag(1),
            sid_star: flag(2),
            sid_star_generic: flag(3),
            sid_star_space: flag(4),
            runway: flag(5),
            approach: flag(6),
            no_final_dct: flag(7),
            flight_level: flag(8),
            alternates: flag(9),
        });
    }
    sets
}

#[test]
fn test_route_tokens_deterministic_without_repeats() -> anyhow::Result<()> {
    let route = Route::from_json(ROUTE_JSON)?;
    let adjusted = route.adjusted_to_procedure_options(AdjustOptions::default());

    for options in all_option_sets() {
        for speed in [0.0, 450.0] {
            let tokens = route_tokens(&adjusted, speed, options);
            assert_eq!(tokens, route_tokens(&adjusted, speed, options));
            assert!(
                tokens.windows(2).all(|w| w[0] != w[1]),
                "repeated token in {:?} for {:?}",
                tokens,
                options
            );
        }
    }
    Ok(())
}

#[test]
fn test_corte_in_style_string() -> anyhow::Result<()> {
    let route = Route::from_json(ROUTE_JSON)?;
    let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
        remove_alternates: true,
        ..Default::default()
    });
    let tokens = route_tokens(
        &adjusted,
        0.0,
        fplx_core::ledger::corte_in::OPTIONS,
    );
    assert_eq!(
        tokens.join(" "),
        "EGLL 27L BPK7G BPK DCT CLN UL620 REDFA REDF1A EHAM FL250"
    );
    Ok(())
}

#[test]
fn test_remove_alternates_drops_exactly_two_legs() -> anyhow::Result<()> {
    let route = Route::from_json(ROUTE_JSON)?;
    let adjusted = route.adjusted_to_procedure_options(AdjustOptions {
        keep_approach_waypoints: true,
        keep_sid_star_waypoints: true,
        remove_alternates: true,
        ..Default::default()
    });

    assert_eq!(adjusted.legs.len(), route.legs.len() - 2);
    assert_eq!(adjusted.legs.last().map(|l| l.ident.as_str()), Some("EHAM"));
    assert_eq!(adjusted.cruising_altitude_ft, route.cruising_altitude_ft);
    Ok(())
}

#[test]
fn test_short_name_never_empty() -> anyhow::Result<()> {
    let route = Route::from_json(ROUTE_JSON)?;
    let name = build_short(&route, "/", ":fpl");
    assert_eq!(name, "EGLLEHAMfpl");
    Ok(())
}

#[test]
fn test_ufmc_layout() {
    let tokens: Vec<String> = ["KJFK", "DCT", "GAYEL", "Q818", "WOZEE", "CYYZ"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        ufmc_lines(&tokens),
        ["KJFK", "CYYZ", "DIRECT", "GAYEL", "Q818", "WOZEE", "99"]
    );
}

#[test]
fn test_hhmm_durations() {
    assert_eq!(minutes_to_hhmm(125), "0205");
    assert_eq!(minutes_to_hhmm(45), "0045");
}
