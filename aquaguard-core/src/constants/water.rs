//! Water-Quality Bounds and Intake Defaults
//!
//! The sanity bounds gate model inference only. Rule evaluation runs on any
//! finite reading; the model is skipped when a value lies outside the range
//! it was trained on.

// ===== MODEL SANITY BOUNDS =====

/// Lowest water temperature passed to the model (°C).
pub const MODEL_TEMP_MIN_C: f32 = 0.0;

/// Highest water temperature passed to the model (°C).
///
/// Pond water above 40°C is lethal for every cultured species in the table.
pub const MODEL_TEMP_MAX_C: f32 = 40.0;

/// Lowest dissolved oxygen passed to the model (mg/L).
pub const MODEL_DO_MIN_MG_L: f32 = 0.0;

/// Highest dissolved oxygen passed to the model (mg/L).
///
/// Fresh water saturates around 14.6 mg/L at 0°C; anything above 20 is a
/// probe fault rather than supersaturation.
pub const MODEL_DO_MAX_MG_L: f32 = 20.0;

/// Lowest pH passed to the model.
pub const MODEL_PH_MIN: f32 = 3.0;

/// Highest pH passed to the model.
pub const MODEL_PH_MAX: f32 = 10.0;

// ===== INTAKE DEFAULTS =====

/// Dissolved oxygen assumed by the two-parameter update (mg/L).
///
/// Used when the pond node has no DO probe fitted.
pub const DEFAULT_DISSOLVED_OXYGEN_MG_L: f32 = 5.0;

// ===== RULE MATCHING =====

/// Parameters checked per species rule (temperature, DO, pH).
pub const RULE_PARAMETER_COUNT: u8 = 3;

/// Range checks that must hold for a species to match.
///
/// Majority vote: one parameter may drift out of range without dropping the
/// species, which keeps a single noisy probe from emptying the result.
pub const DEFAULT_MIN_MATCHES: u8 = 2;
