//! Constants for AquaGuard Core
//!
//! Every tuned number the classifier depends on lives here with its unit and
//! its source, so deployments can see exactly what the defaults are before
//! overriding them through `MonitorConfig`.
//!
//! ## Organization
//!
//! - **Water**: sanity bounds for model inference and intake defaults
//! - **Species**: the default rule table (Indonesian national standard ranges)
//! - **Buffers**: rolling window sizing
//! - **Time**: unit conversions

/// Water-quality bounds and intake defaults.
pub mod water;

/// Default species rule table.
pub mod species;

/// Rolling window sizing.
pub mod buffers;

/// Time unit conversions.
pub mod time;

pub use water::{
    MODEL_TEMP_MIN_C, MODEL_TEMP_MAX_C,
    MODEL_DO_MIN_MG_L, MODEL_DO_MAX_MG_L,
    MODEL_PH_MIN, MODEL_PH_MAX,
    DEFAULT_DISSOLVED_OXYGEN_MG_L, DEFAULT_MIN_MATCHES, RULE_PARAMETER_COUNT,
};

pub use species::STANDARD_RULES;

pub use buffers::{WINDOW_CAPACITY, SAMPLE_INTERVAL_MS};

pub use time::MS_PER_SECOND;
