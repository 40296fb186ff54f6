//! Shared fixtures for integration tests
//!
//! Stand-in species models covering every way a model can answer or fail.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use aquaguard_core::{ModelError, ModelResult, SpeciesModel, FEATURE_COUNT};

/// Always answers with the same raw label
pub struct LabelModel(pub &'static str);

impl SpeciesModel for LabelModel {
    fn predict(&self, _features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
        Ok(self.0.to_string())
    }
}

/// Always reports failure
pub struct FailingModel;

impl SpeciesModel for FailingModel {
    fn predict(&self, _features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
        Err(ModelError::Failed { reason: "inference backend offline" })
    }
}

/// Panics on every call
pub struct PanickingModel;

impl SpeciesModel for PanickingModel {
    fn predict(&self, _features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
        panic!("model exploded");
    }
}

/// Signals when inference starts, then takes `delay` to answer
pub struct SlowModel {
    pub started: Arc<AtomicBool>,
    pub delay: Duration,
}

impl SlowModel {
    pub fn new(delay: Duration) -> (Self, Arc<AtomicBool>) {
        let started = Arc::new(AtomicBool::new(false));
        (Self { started: Arc::clone(&started), delay }, started)
    }
}

impl SpeciesModel for SlowModel {
    fn predict(&self, _features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
        self.started.store(true, Ordering::SeqCst);
        thread::sleep(self.delay);
        Ok("nila".to_string())
    }
}

/// Counts calls and echoes the feature vector it saw as a label
#[derive(Default)]
pub struct RecordingModel {
    pub calls: AtomicUsize,
}

impl RecordingModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Shared handle to a [`RecordingModel`] that can be boxed as a model
pub struct Recorder(pub Arc<RecordingModel>);

impl SpeciesModel for Recorder {
    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("do{}-t{}-ph{}", features[0], features[1], features[2]))
    }
}

/// Readings used across scenarios: (temperature, dissolved oxygen, pH)
pub mod readings {
    /// Inside every standard rule
    pub const IDEAL: (f32, f32, f32) = (25.0, 4.0, 7.0);
    /// Outside every rule and the model sanity bounds
    pub const HOSTILE: (f32, f32, f32) = (50.0, 25.0, 1.0);
    /// Warm, oxygen-poor water: lele and nila only
    pub const WARM_LOW_OXYGEN: (f32, f32, f32) = (32.0, 2.5, 8.0);
}
