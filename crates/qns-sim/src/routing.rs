//! Probabilistic routing of departing customers.
//!
//! Inverse-CDF sampling over a discrete distribution: one uniform draw
//! scaled by the sum of the weights, then a walk accumulating a running
//! total until it meets or exceeds the draw.  The walk order is the summing
//! order, so weight *order* is part of the routing semantics.

use qns_core::{StationId, VariateSource};

/// Where a customer leaving a station goes next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Station(StationId),
    Exit,
}

/// Pick a destination from `weights`, whose final entry is the exit weight.
///
/// Weights need not sum to 1 — normalization is implicit in scaling the draw
/// by the sum.  If all weights are zero the destination defaults to exit
/// **without consuming a variate**; under a draw-budget termination policy
/// that distinction is observable.
pub fn pick_destination(weights: &[f64], rng: &mut VariateSource) -> RouteOutcome {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return RouteOutcome::Exit;
    }

    let draw = rng.next_uniform(0.0, sum);
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw <= cumulative {
            return if i + 1 == weights.len() {
                RouteOutcome::Exit
            } else {
                RouteOutcome::Station(StationId(i as u16))
            };
        }
    }

    // Unreachable for finite weights (draw < sum == final cumulative), but
    // floating-point summation order differences land here safely.
    RouteOutcome::Exit
}
