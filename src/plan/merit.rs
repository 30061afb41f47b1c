//! Merit-order ranking of costed plants.

use super::cost::CostedPlant;
use super::error::RankError;

/// Orders plants by dispatch priority.
///
/// Wind plants always come first, sorted by marginal cost (all zero, so the
/// stable sort keeps request order). The remaining plants follow, most
/// efficient first and, among equal efficiency, lowest `pmin` first.
///
/// # Errors
///
/// Returns [`RankError::NonFiniteKey`] if any sort key is NaN or infinite.
pub fn rank(plants: Vec<CostedPlant>) -> Result<Vec<CostedPlant>, RankError> {
    for plant in &plants {
        check_key(plant, "efficiency", plant.spec.efficiency)?;
        check_key(plant, "pmin", plant.spec.pmin)?;
        check_key(plant, "marginal cost", plant.marginal_cost)?;
    }

    let (mut ordered, mut fossil): (Vec<_>, Vec<_>) =
        plants.into_iter().partition(CostedPlant::is_wind);

    ordered.sort_by(|a, b| a.marginal_cost.total_cmp(&b.marginal_cost));
    fossil.sort_by(|a, b| {
        b.spec
            .efficiency
            .total_cmp(&a.spec.efficiency)
            .then_with(|| a.spec.pmin.total_cmp(&b.spec.pmin))
    });

    ordered.extend(fossil);
    Ok(ordered)
}

fn check_key(plant: &CostedPlant, field: &'static str, value: f64) -> Result<(), RankError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RankError::NonFiniteKey {
            plant: plant.name().to_string(),
            field,
        })
    }
}
