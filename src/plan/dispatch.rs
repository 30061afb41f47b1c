//! Stepped dispatch search over a merit-ordered plant list.
//!
//! Each plant, in merit order, takes the largest output in its range that
//! either closes the remaining gap or leaves the next plant enough load to
//! run at its own minimum. The last plant in merit order may also take any
//! output that does not exceed the remaining load, so an over-demanded
//! roster saturates instead of dropping its final plant.

use tracing::debug;

use super::cost::CostedPlant;
use super::error::DispatchError;
use super::types::PlantOutput;

/// Default search granularity (MW).
pub const DEFAULT_STEP_MW: f64 = 1.0;

/// Slack allowed when the last candidate lands on `pmin` after repeated
/// subtraction of the step.
const RANGE_EPSILON: f64 = 1e-9;

/// Candidates checked around the remaining load before jumping to `bound`.
const GAP_WINDOW: usize = 4;

/// Assigns power to every plant so that total output covers `total_load`.
///
/// Candidates for each plant are explored from `pmax` downwards in `step_mw`
/// increments, never below `pmin`. Wind plants with no wind are skipped.
/// The result lists every plant exactly once, in merit order; plants that
/// received nothing report `0.0`.
///
/// # Arguments
///
/// * `ordered` - Plants in merit order
/// * `total_load` - Load to cover (MW)
/// * `step_mw` - Search granularity (MW)
///
/// # Errors
///
/// Returns a [`DispatchError`] if the load or step is invalid, or if a plant
/// has a negative, non-finite or inverted output range.
pub fn dispatch(
    ordered: &[CostedPlant],
    total_load: f64,
    step_mw: f64,
) -> Result<Vec<PlantOutput>, DispatchError> {
    if !total_load.is_finite() || total_load < 0.0 {
        return Err(DispatchError::InvalidLoad(total_load));
    }
    if !step_mw.is_finite() || step_mw <= 0.0 {
        return Err(DispatchError::InvalidStep(step_mw));
    }
    for plant in ordered {
        check_range(plant)?;
    }

    let mut remaining = total_load;
    let mut assigned: Vec<Option<f64>> = vec![None; ordered.len()];

    for (i, plant) in ordered.iter().enumerate() {
        if plant.is_wind() && plant.capacity <= 0.0 {
            debug!(plant = plant.name(), "no wind, skipping");
            continue;
        }

        let next_pmin = ordered.get(i + 1).map(|next| next.spec.pmin);
        let Some(mut power) = first_accepted(plant, remaining, next_pmin, step_mw) else {
            debug!(plant = plant.name(), remaining, "no feasible output");
            continue;
        };

        remaining -= power;
        if remaining < 0.0 {
            power += remaining;
            remaining = 0.0;
        }

        debug!(plant = plant.name(), power, remaining, "plant dispatched");
        assigned[i] = Some(round2(power));
    }

    Ok(ordered
        .iter()
        .zip(assigned)
        .map(|(plant, power)| PlantOutput {
            name: plant.name().to_string(),
            power: power.unwrap_or(0.0),
        })
        .collect())
}

/// Returns the first output, from the top of the plant's range down, that the
/// acceptance rule allows.
fn first_accepted(
    plant: &CostedPlant,
    remaining: f64,
    next_pmin: Option<f64>,
    step_mw: f64,
) -> Option<f64> {
    let (pmin, pmax) = plant.dispatch_range();
    // Room for the next plant's minimum, or the whole remainder for the last plant.
    let bound = remaining - next_pmin.unwrap_or(0.0);

    let accepts = |value: f64| {
        // The overshoot clamp must not push the plant under its minimum.
        let closes_gap =
            (remaining - value).abs() < step_mw && value.min(remaining) >= pmin - RANGE_EPSILON;
        closes_gap || value <= bound
    };

    // Nothing at or above `remaining + step` can be accepted, so start just
    // above that and look at the few candidates around the gap.
    let near_gap = steps_down_to(pmax, remaining + step_mw, step_mw);
    if let Some(value) = candidates(pmin, pmax, step_mw, near_gap)
        .take(GAP_WINDOW)
        .find(|&value| accepts(value))
    {
        return Some(value);
    }

    // Below the gap only `bound` can accept.
    let below_bound = steps_down_to(pmax, bound, step_mw).max(near_gap);
    candidates(pmin, pmax, step_mw, below_bound).find(|&value| accepts(value))
}

/// Number of whole steps from `pmax` that stays at or above `target`,
/// rounded down so no candidate is skipped.
fn steps_down_to(pmax: f64, target: f64, step_mw: f64) -> u64 {
    let steps = ((pmax - target) / step_mw).floor();
    if steps > 0.0 { steps as u64 } else { 0 }
}

/// `pmax - first * step, pmax - (first + 1) * step, ...` down to `pmin`.
fn candidates(pmin: f64, pmax: f64, step_mw: f64, first: u64) -> impl Iterator<Item = f64> {
    (first..)
        .map(move |k| pmax - k as f64 * step_mw)
        .take_while(move |&value| value >= pmin - RANGE_EPSILON)
        .map(move |value| value.max(pmin))
}

fn check_range(plant: &CostedPlant) -> Result<(), DispatchError> {
    let (pmin, pmax) = (plant.spec.pmin, plant.spec.pmax);
    if pmin.is_finite() && pmax.is_finite() && pmin >= 0.0 && pmin <= pmax {
        Ok(())
    } else {
        Err(DispatchError::InvalidRange {
            plant: plant.name().to_string(),
            pmin,
            pmax,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
