// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::metadata::ExportMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Ivap,
    /// Spaces every line by a blank line and carries the crew keys.
    XIvap,
}

/// Duration as `HHMM`, e.g. 125 minutes is `0205`.
pub fn minutes_to_hhmm(minutes: u32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

struct IvapWriter {
    out: String,
    variant: Variant,
}

impl IvapWriter {
    fn line(&mut self, key: &str, value: impl std::fmt::Display) {
        self.out.push_str(&format!("{}={}\n", key, value));
        if self.variant == Variant::XIvap {
            self.out.push('\n');
        }
    }
}

/// `[FLIGHTPLAN]` key=value file for IvAp or X-IvAp.
pub fn write_ivap(meta: &ExportMetadata, variant: Variant) -> String {
    let mut w = IvapWriter {
        out: String::from("[FLIGHTPLAN]\n"),
        variant,
    };

    match variant {
        Variant::XIvap => {
            w.out.push('\n');
            w.line("CALLSIGN", &meta.callsign);
            w.line("LIVERY", &meta.livery);
            w.line("AIRLINE", &meta.airline);
            w.line("PIC", &meta.pilot_in_command);
            w.line("ALT2ICAO", &meta.alternate2);
            w.line("FMCROUTE", "");
        }
        Variant::Ivap => {
            w.line("ID", &meta.callsign);
            w.line("ALTICAO2", &meta.alternate2);
        }
    }

    w.line("SPEEDTYPE", "N");
    w.line("POB", meta.passengers);
    w.line("ENDURANCE", minutes_to_hhmm(meta.endurance_minutes));
    w.line("OTHER", &meta.remarks);
    w.line("ALTICAO", &meta.alternate);
    w.line("EET", minutes_to_hhmm(meta.enroute_minutes));
    w.line("DESTICAO", &meta.destination);
    w.line("ROUTE", &meta.route);
    w.line("LEVEL", meta.cruise_altitude / 100);
    w.line("LEVELTYPE", "F");
    w.line("SPEED", meta.speed);
    w.line("DEPTIME", meta.departure_time.format("%H%M"));
    w.line("DEPICAO", &meta.departure);
    w.line("TRANSPONDER", &meta.transponder);
    w.line("EQUIPMENT", &meta.equipment);
    w.line("WAKECAT", &meta.wake_category);
    w.line("ACTYPE", &meta.aircraft_type);
    w.line("NUMBER", 1);
    w.line("FLIGHTTYPE", &meta.flight_type);
    w.line("RULES", &meta.flight_rules);

    w.out
}
