//! Latest published reading and its classification
//!
//! One slot, overwritten on every submitted reading and read by pollers. The
//! pair is always replaced as a unit so a reader never sees a reading next to
//! the result of a different reading.

use crate::reading::Reading;
use crate::species::ClassificationResult;

/// Most recent reading and the species list computed for it
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatestState {
    /// Last accepted reading, `None` before the first submit
    pub last_reading: Option<Reading>,
    /// Classification of `last_reading`
    pub last_result: ClassificationResult,
}

impl LatestState {
    /// Empty slot as found at startup
    pub const fn empty() -> Self {
        Self { last_reading: None, last_result: ClassificationResult::empty() }
    }

    /// Replace the stored pair
    pub fn update(&mut self, reading: Reading, result: ClassificationResult) {
        self.last_reading = Some(reading);
        self.last_result = result;
    }

    /// Copy of the stored pair
    pub fn snapshot(&self) -> LatestState {
        self.clone()
    }

    /// Whether anything has been published yet
    pub fn is_empty(&self) -> bool {
        self.last_reading.is_none()
    }
}
