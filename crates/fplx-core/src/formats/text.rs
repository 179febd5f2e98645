// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::route::Route;
use crate::route_string::{route_string, route_tokens, RouteStringOptions};

/// Single line route used by TXT, IXEG and X-FMC files.
pub fn plain_route(route: &Route) -> String {
    route_string(
        route,
        0.0,
        RouteStringOptions {
            dct: true,
            start_and_dest: true,
            sid_star_generic: true,
            ..RouteStringOptions::NONE
        },
    )
}

/// UFMC layout: departure and destination first, then the route tokens one
/// per line with `DIRECT` for direct legs, closed by `99`.
pub fn ufmc_lines(tokens: &[String]) -> Vec<String> {
    let mut tokens = tokens.to_vec();
    if tokens.len() >= 2 && tokens[tokens.len() - 2] == "DCT" {
        tokens.remove(tokens.len() - 2);
    }
    for token in tokens.iter_mut().filter(|t| t.as_str() == "DCT") {
        *token = "DIRECT".to_string();
    }

    let mut lines = Vec::with_capacity(tokens.len() + 2);
    if let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
        lines.push(first.clone());
        lines.push(last.clone());
    }
    if tokens.len() > 2 {
        lines.extend_from_slice(&tokens[1..tokens.len() - 1]);
    }
    lines.push("99".to_string());
    lines
}

pub fn ufmc(route: &Route) -> String {
    let tokens = route_tokens(
        route,
        0.0,
        RouteStringOptions {
            dct: true,
            start_and_dest: true,
            ..RouteStringOptions::NONE
        },
    );
    let mut text = ufmc_lines(&tokens).join("\n");
    text.push('\n');
    text
}
