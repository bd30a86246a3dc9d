//! Human-readable itinerary labels.

use crate::domain::{Leg, StationCode};
use crate::network::TransitNetwork;

fn display_name(network: &TransitNetwork, code: StationCode) -> String {
    network
        .station_name(code)
        .map(str::to_owned)
        .unwrap_or_else(|| code.to_string())
}

/// Render a leg sequence as a station-name chain.
///
/// Stations are joined with " --> ": the first leg's origin followed by
/// every leg's destination. Stations missing from the network render as
/// their raw code. An empty sequence renders as an empty string.
pub fn trip_label(network: &TransitNetwork, legs: &[Leg]) -> String {
    let Some(first) = legs.first() else {
        return String::new();
    };

    let mut label = display_name(network, first.from());
    for leg in legs {
        label.push_str(" --> ");
        label.push_str(&display_name(network, leg.to()));
    }
    label
}
