//! Core classification engine for AquaGuard
//!
//! Decides which fish species suit the current pond water by combining a
//! hand-authored rule table with an optional pre-trained model, and smooths
//! noisy probes with a rolling window of recent readings.
//!
//! Key constraints:
//! - Classification is a pure function of the inputs (plus debug logging)
//! - Model trouble never fails a request; it narrows the result to rules only
//! - Rules, window and classifier run without `std` (needs `alloc`)
//!
//! ```no_run
//! use aquaguard_core::{Classifier, MonitorService};
//!
//! let monitor = MonitorService::new(Classifier::rules_only());
//!
//! match monitor.submit_reading(27.0, 5.5, 7.2) {
//!     Ok(species) => println!("suitable: {:?}", species.species()),
//!     Err(e) => println!("rejected: {}", e),
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Logging compiles away when the `log` feature is off
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod classifier;
pub mod constants;
pub mod errors;
pub mod model;
pub mod reading;
pub mod rules;
pub mod species;
pub mod state;
pub mod time;
pub mod traits;
pub mod window;

pub mod config;
#[cfg(feature = "std")]
pub mod service;

// Public API
pub use classifier::Classifier;
pub use config::{ConfigError, MonitorConfig};
pub use errors::{
    ModelError, ModelResult, ReadingError, ReadingResult, RuleError, WindowError, WindowResult,
};
pub use model::{ModelAdapter, Prediction, SanityBounds, FEATURE_COUNT, FEATURE_ORDER};
pub use reading::Reading;
pub use rules::{Interval, RuleTable, SpeciesRule};
pub use species::ClassificationResult;
pub use state::LatestState;
pub use time::{FixedTime, TimeSource, Timestamp};
pub use traits::SpeciesModel;
pub use window::{Averages, SensorWindow};

#[cfg(feature = "std")]
pub use service::{MonitorService, WindowClassification};
#[cfg(feature = "std")]
pub use time::SystemTime;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
