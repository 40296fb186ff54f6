//! Monitor service: the single owner of shared state
//!
//! Request handlers hold a reference (or an `Arc`) to one [`MonitorService`]
//! and call into it concurrently. The sliding window and the latest-state
//! slot sit behind one mutex. A submitted reading goes through
//!
//! ```text
//! Received ─> Validated ─> Classified ─> [ Recorded (window) ─> Published (latest state) ]
//! ```
//!
//! Classification, and with it the model call, happens outside the lock, so
//! pollers never wait on the model. The bracketed steps share one critical
//! section, so pollers never see a window and a published pair that
//! disagree. A reading that fails validation stops before `Classified` and
//! leaves no trace.
//!
//! ```rust
//! use aquaguard_core::{Classifier, MonitorService, WindowError};
//!
//! let monitor = MonitorService::new(Classifier::rules_only());
//! assert!(matches!(
//!     monitor.classify_on_average(),
//!     Err(WindowError::InsufficientData { .. })
//! ));
//!
//! let species = monitor.submit_reading(25.0, 4.0, 7.0)?;
//! assert!(species.contains("Nila"));
//! assert_eq!(monitor.current_state().last_result, species);
//! # Ok::<(), aquaguard_core::ReadingError>(())
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::classifier::Classifier;
use crate::config::{ConfigError, MonitorConfig};
use crate::constants::DEFAULT_DISSOLVED_OXYGEN_MG_L;
use crate::errors::{ReadingResult, WindowResult};
use crate::reading::Reading;
use crate::species::ClassificationResult;
use crate::state::LatestState;
use crate::time::{SystemTime, TimeSource};
use crate::traits::SpeciesModel;
use crate::window::{Averages, SensorWindow};

/// Classification of the rolling average
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowClassification {
    /// Mean of every reading in the window, serialized to two decimals
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_rounded"))]
    pub average: Averages,
    /// Species suitable for the mean conditions
    pub result: ClassificationResult,
    /// Readings the mean was taken over
    pub sample_count: usize,
}

#[cfg(feature = "serde")]
fn serialize_rounded<S: serde::Serializer>(average: &Averages, serializer: S) -> Result<S::Ok, S::Error> {
    serde::Serialize::serialize(&average.rounded(), serializer)
}

/// State mutated by submits, always locked together
#[derive(Debug, Default)]
struct Shared {
    window: SensorWindow,
    latest: LatestState,
}

/// Thread-safe front door to the classifier
pub struct MonitorService {
    classifier: Classifier,
    shared: Mutex<Shared>,
    clock: Box<dyn TimeSource + Send + Sync>,
    default_dissolved_oxygen: f32,
}

impl MonitorService {
    /// Service around `classifier`, stamped by the system clock
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            shared: Mutex::new(Shared::default()),
            clock: Box::new(SystemTime),
            default_dissolved_oxygen: DEFAULT_DISSOLVED_OXYGEN_MG_L,
        }
    }

    /// Service built from a validated configuration
    pub fn from_config(
        config: &MonitorConfig,
        model: Option<Box<dyn SpeciesModel>>,
    ) -> Result<Self, ConfigError> {
        let mut service = Self::new(config.classifier(model)?);
        service.default_dissolved_oxygen = config.default_dissolved_oxygen;
        Ok(service)
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: impl TimeSource + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Classifier in use
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Dissolved oxygen assumed by [`submit_simple`](Self::submit_simple)
    pub fn default_dissolved_oxygen(&self) -> f32 {
        self.default_dissolved_oxygen
    }

    /// Record a full reading, classify it and publish the result
    ///
    /// The model runs before the lock is taken, so a slow model delays only
    /// this caller. The reading is stamped, recorded and published with its
    /// result in one critical section.
    pub fn submit_reading(
        &self,
        temperature: f32,
        dissolved_oxygen: f32,
        ph: f32,
    ) -> ReadingResult<ClassificationResult> {
        let candidate = Reading::new(temperature, dissolved_oxygen, ph, 0)?;
        let result = self.classifier.classify(temperature, dissolved_oxygen, ph);

        let mut shared = self.lock();

        // Stamped under the lock so window order matches timestamp order
        let reading = Reading { timestamp: self.clock.now(), ..candidate };

        if let Some(evicted) = shared.window.record(reading) {
            log_debug!("Window full, evicted reading from t={}", evicted.timestamp);
        }
        shared.latest.update(reading, result.clone());
        drop(shared);

        log_info!(
            "Reading published: temp={}°C do={}mg/L ph={} -> {:?}",
            temperature, dissolved_oxygen, ph, result.species()
        );

        Ok(result)
    }

    /// Two-parameter update for nodes without an oxygen probe
    pub fn submit_simple(&self, temperature: f32, ph: f32) -> ReadingResult<ClassificationResult> {
        self.submit_reading(temperature, self.default_dissolved_oxygen, ph)
    }

    /// Last published pair, as stored
    pub fn current_state(&self) -> LatestState {
        self.lock().latest.snapshot()
    }

    /// Classify the mean of the rolling window
    ///
    /// Fails with `WindowError::InsufficientData` when nothing has been
    /// recorded yet. The published latest state is left untouched.
    pub fn classify_on_average(&self) -> WindowResult<WindowClassification> {
        let (average, sample_count) = {
            let shared = self.lock();
            (shared.window.average()?, shared.window.len())
        };

        let result = self.classifier.classify(
            average.temperature,
            average.dissolved_oxygen,
            average.ph,
        );

        Ok(WindowClassification { average, result, sample_count })
    }

    /// Readings currently in the window
    pub fn window_len(&self) -> usize {
        self.lock().window.len()
    }

    /// Copy of the window contents, oldest first
    pub fn window_readings(&self) -> Vec<Reading> {
        self.lock().window.iter().copied().collect()
    }

    // Every critical section leaves `Shared` consistent, so a poisoned lock
    // is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for MonitorService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MonitorService")
            .field("classifier", &self.classifier)
            .field("wall_clock", &self.clock.is_wall_clock())
            .field("default_dissolved_oxygen", &self.default_dissolved_oxygen)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ReadingError, WindowError};
    use crate::time::FixedTime;
    use std::sync::Arc;

    fn monitor() -> (MonitorService, Arc<FixedTime>) {
        let clock = Arc::new(FixedTime::new(1_000));
        let service = MonitorService::new(Classifier::rules_only()).with_clock(clock.clone());
        (service, clock)
    }

    #[test]
    fn state_is_empty_before_first_submit() {
        let (monitor, _) = monitor();
        let state = monitor.current_state();
        assert!(state.last_reading.is_none());
        assert!(state.last_result.is_empty());
    }

    #[test]
    fn submit_publishes_pair() {
        let (monitor, clock) = monitor();
        clock.set(42_000);

        let result = monitor.submit_reading(25.0, 4.0, 7.0).unwrap();
        let state = monitor.current_state();

        assert_eq!(state.last_result, result);
        let reading = state.last_reading.unwrap();
        assert_eq!(reading.parameters(), (25.0, 4.0, 7.0));
        assert_eq!(reading.timestamp, 42_000);
    }

    #[test]
    fn rejected_reading_is_not_recorded() {
        let (monitor, _) = monitor();
        monitor.submit_reading(25.0, 4.0, 7.0).unwrap();
        let before = monitor.current_state();

        assert_eq!(
            monitor.submit_reading(f32::NAN, 4.0, 7.0),
            Err(ReadingError::InvalidValue { field: "temperature" })
        );
        assert_eq!(monitor.window_len(), 1);
        assert_eq!(monitor.current_state(), before);
    }

    #[test]
    fn simple_submit_defaults_oxygen() {
        let (monitor, _) = monitor();
        monitor.submit_simple(28.0, 7.2).unwrap();

        let reading = monitor.current_state().last_reading.unwrap();
        assert_eq!(reading.dissolved_oxygen, 5.0);
    }

    #[test]
    fn average_needs_data() {
        let (monitor, _) = monitor();
        assert_eq!(
            monitor.classify_on_average(),
            Err(WindowError::InsufficientData { required: 1, available: 0 })
        );
    }

    #[test]
    fn average_over_window() {
        let (monitor, clock) = monitor();
        for (t, o, ph) in [(24.0, 4.0, 7.0), (26.0, 6.0, 7.4)] {
            monitor.submit_reading(t, o, ph).unwrap();
            clock.advance(5_000);
        }

        let summary = monitor.classify_on_average().unwrap();
        assert_eq!(summary.sample_count, 2);
        assert_eq!(summary.average.temperature, 25.0);
        assert_eq!(summary.average.dissolved_oxygen, 5.0);
        assert_eq!(summary.result, monitor.classifier().classify(25.0, 5.0, 7.2));
    }

    #[test]
    fn average_serializes_rounded() {
        let (monitor, _) = monitor();
        for (t, o) in [(25.0, 4.0), (26.0, 4.0), (26.0, 5.0)] {
            monitor.submit_reading(t, o, 7.0).unwrap();
        }

        let summary = monitor.classify_on_average().unwrap();
        let json = serde_json::to_string(&summary).unwrap();

        assert!(json.contains(r#""temperature":25.67"#), "{}", json);
        assert!(json.contains(r#""dissolved_oxygen":4.33"#), "{}", json);
        assert!(json.contains(r#""sample_count":3"#), "{}", json);
        // In-memory value keeps full precision
        assert!(summary.average.temperature > 25.666 && summary.average.temperature < 25.667);
    }

    #[test]
    fn average_does_not_publish() {
        let (monitor, _) = monitor();
        monitor.submit_reading(31.0, 2.5, 8.0).unwrap();
        let before = monitor.current_state();

        monitor.classify_on_average().unwrap();
        assert_eq!(monitor.current_state(), before);
    }

    #[test]
    fn window_keeps_twelve() {
        let (monitor, clock) = monitor();
        for i in 0..13 {
            monitor.submit_reading(20.0 + i as f32, 5.0, 7.0).unwrap();
            clock.advance(5_000);
        }

        let readings = monitor.window_readings();
        assert_eq!(readings.len(), 12);
        assert_eq!(readings[0].temperature, 21.0);
        assert_eq!(readings[11].temperature, 32.0);
    }
}
