// Signal Fuser - model results to the 8-metric skin score vector
//
// Deterministic where the models give a direct signal, jittered within a
// fixed band where they don't. Every score is clamped to 0-100 and rounded.

use super::signal_policy::*;
use crate::types::{MultiModelResult, SignalVector};
use rand::Rng;

/// Fuse model results into a signal vector using the thread RNG
pub fn fuse_signals(result: &MultiModelResult, declared_age: u32) -> SignalVector {
    fuse_signals_with_rng(result, declared_age, &mut rand::thread_rng())
}

/// Fuse model results with a caller-supplied RNG
///
/// # Arguments
/// * `result` - fan-out output (any subset of models may be present)
/// * `declared_age` - the customer's stated age in years
/// * `rng` - jitter source; seed it for reproducible output
pub fn fuse_signals_with_rng<R: Rng>(
    result: &MultiModelResult,
    declared_age: u32,
    rng: &mut R,
) -> SignalVector {
    let declared_age = declared_age as f64;
    let has_spots = has_condition(result, &SPOT_CONDITIONS);
    let has_redness = has_condition(result, &REDNESS_CONDITIONS);
    let acne_level = result.acne_severity.as_ref().map(|a| a.level as f64);

    let spots = if has_spots { SPOTS_FOUND } else { SPOTS_CLEAR }.sample(rng.gen());

    let wrinkles = match &result.age_estimation {
        Some(age) => {
            let diff = age.estimated_age as f64 - declared_age;
            (WRINKLES_BASE - diff * WRINKLES_PER_YEAR).clamp(WRINKLES_MIN, WRINKLES_MAX)
        }
        None => WRINKLES_NO_AGE,
    };

    let texture = match &result.skin_type {
        Some(skin) => texture_base(&skin.label) + skin_type_jitter(rng),
        None => TEXTURE_NO_SKIN_TYPE,
    };

    let pores = match &result.skin_type {
        Some(skin) => pores_base(&skin.label) + skin_type_jitter(rng),
        None => PORES_NO_SKIN_TYPE,
    };

    let uv_age_score =
        (UV_BASE - (declared_age - UV_REFERENCE_AGE) * UV_PER_YEAR).max(UV_MIN);
    let uv_spots = if has_spots {
        uv_age_score - UV_SPOTS_PENALTY
    } else {
        uv_age_score
    };

    let brown_spots = if has_spots {
        BROWN_SPOTS_FOUND
    } else {
        BROWN_SPOTS_CLEAR
    }
    .sample(rng.gen());

    let red_areas = if has_redness {
        RED_AREAS_REDNESS.sample(rng.gen())
    } else {
        (RED_AREAS_BASE - acne_level.unwrap_or(0.0) * RED_AREAS_PER_ACNE_LEVEL).max(RED_AREAS_MIN)
    };

    let porphyrins = match acne_level {
        Some(level) => (PORPHYRINS_BASE - level * PORPHYRINS_PER_ACNE_LEVEL).max(PORPHYRINS_MIN),
        None => PORPHYRINS_NO_ACNE.sample(rng.gen()),
    };

    SignalVector {
        spots: to_score(spots),
        wrinkles: to_score(wrinkles),
        texture: to_score(texture),
        pores: to_score(pores),
        uv_spots: to_score(uv_spots),
        brown_spots: to_score(brown_spots),
        red_areas: to_score(red_areas),
        porphyrins: to_score(porphyrins),
    }
}

fn has_condition(result: &MultiModelResult, names: &[&str]) -> bool {
    result
        .skin_conditions
        .iter()
        .any(|c| names.contains(&c.condition.as_str()))
}

fn skin_type_jitter<R: Rng>(rng: &mut R) -> f64 {
    (rng.gen::<f64>() - 0.5) * SKIN_TYPE_JITTER
}

/// Clamp to 0-100 and round to the nearest integer
pub fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}
