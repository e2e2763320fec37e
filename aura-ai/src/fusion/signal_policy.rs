// Signal Policy - heuristic tables for the 8-metric skin score vector
//
// Every constant the fuser uses lives here so the policy can be read and
// tuned in one place.

/// Conditions that indicate pigment spots
pub const SPOT_CONDITIONS: [&str; 2] = ["keratosis", "milia"];

/// Conditions that indicate redness
pub const REDNESS_CONDITIONS: [&str; 2] = ["rosacea", "eczema"];

/// A uniformly jittered band: `base + r * span`, r in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub base: f64,
    pub span: f64,
}

impl Band {
    pub const fn new(base: f64, span: f64) -> Self {
        Self { base, span }
    }

    pub fn sample(&self, r: f64) -> f64 {
        self.base + r * self.span
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.base && value <= self.base + self.span
    }
}

// Spots
pub const SPOTS_FOUND: Band = Band::new(40.0, 20.0);
pub const SPOTS_CLEAR: Band = Band::new(65.0, 20.0);

// Wrinkles: apparent age vs declared age
pub const WRINKLES_BASE: f64 = 75.0;
pub const WRINKLES_PER_YEAR: f64 = 3.0;
pub const WRINKLES_MIN: f64 = 20.0;
pub const WRINKLES_MAX: f64 = 95.0;
pub const WRINKLES_NO_AGE: f64 = 60.0;

/// Half-width applied as `(r - 0.5) * SKIN_TYPE_JITTER`
pub const SKIN_TYPE_JITTER: f64 = 10.0;

// Texture by skin type
pub const TEXTURE_NO_SKIN_TYPE: f64 = 65.0;
pub const TEXTURE_UNKNOWN_LABEL: f64 = 65.0;

pub fn texture_base(label: &str) -> f64 {
    match label {
        "normal" => 80.0,
        "combination" => 65.0,
        "oily" => 55.0,
        "dry" => 50.0,
        _ => TEXTURE_UNKNOWN_LABEL,
    }
}

// Pores by skin type (oily skin shows larger pores)
pub const PORES_NO_SKIN_TYPE: f64 = 60.0;
pub const PORES_UNKNOWN_LABEL: f64 = 60.0;

pub fn pores_base(label: &str) -> f64 {
    match label {
        "normal" => 75.0,
        "dry" => 80.0,
        "combination" => 55.0,
        "oily" => 45.0,
        _ => PORES_UNKNOWN_LABEL,
    }
}

// UV spots by declared age
pub const UV_BASE: f64 = 90.0;
pub const UV_REFERENCE_AGE: f64 = 25.0;
pub const UV_PER_YEAR: f64 = 1.5;
pub const UV_MIN: f64 = 30.0;
pub const UV_SPOTS_PENALTY: f64 = 15.0;

// Brown spots
pub const BROWN_SPOTS_FOUND: Band = Band::new(35.0, 20.0);
pub const BROWN_SPOTS_CLEAR: Band = Band::new(70.0, 15.0);

// Red areas
pub const RED_AREAS_REDNESS: Band = Band::new(40.0, 15.0);
pub const RED_AREAS_BASE: f64 = 85.0;
pub const RED_AREAS_PER_ACNE_LEVEL: f64 = 10.0;
pub const RED_AREAS_MIN: f64 = 50.0;

// Porphyrins by acne level
pub const PORPHYRINS_BASE: f64 = 90.0;
pub const PORPHYRINS_PER_ACNE_LEVEL: f64 = 15.0;
pub const PORPHYRINS_MIN: f64 = 30.0;
pub const PORPHYRINS_NO_ACNE: Band = Band::new(80.0, 10.0);
