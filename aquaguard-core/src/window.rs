//! Fixed-Size Sliding Window of Recent Readings
//!
//! ## Overview
//!
//! Pond sensors are noisy: a DO probe twitches by half a mg/L between two
//! samples five seconds apart. The window keeps the last `N` readings (one
//! minute at the default capacity of 12) so the monitor can classify on their
//! mean instead of on a single sample.
//!
//! ## Why a Circular Buffer?
//!
//! - O(1) insertion, overwriting the oldest reading when full (FIFO eviction)
//! - O(n) iteration in insertion order for averaging
//! - Fixed memory: `N` slots decided at compile time, no allocation
//!
//! ### Memory Layout
//!
//! ```text
//! SensorWindow<5> after 7 records (r0..r6):
//! ┌────┬────┬────┬────┬────┐
//! │ r5 │ r6 │ r2 │ r3 │ r4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── write_pos = 2 (oldest reading, next to be overwritten)
//!
//! Logical order: r2, r3, r4, r5, r6
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use aquaguard_core::{Reading, SensorWindow};
//!
//! let mut window: SensorWindow = SensorWindow::new();
//! window.record(Reading::new(26.0, 5.0, 7.0, 0).unwrap());
//! window.record(Reading::new(28.0, 6.0, 7.4, 5_000).unwrap());
//!
//! let avg = window.average().unwrap();
//! assert_eq!(avg.temperature, 27.0);
//! assert_eq!(window.len(), 2);
//! ```

use crate::constants::WINDOW_CAPACITY;
use crate::errors::{WindowError, WindowResult};
use crate::reading::Reading;

/// Per-parameter arithmetic mean over the window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Averages {
    /// Mean water temperature in °C
    pub temperature: f32,
    /// Mean dissolved oxygen in mg/L
    pub dissolved_oxygen: f32,
    /// Mean pH
    pub ph: f32,
}

impl Averages {
    /// Values rounded to two decimals for display
    pub fn rounded(&self) -> Self {
        Self {
            temperature: round2(self.temperature),
            dissolved_oxygen: round2(self.dissolved_oxygen),
            ph: round2(self.ph),
        }
    }
}

fn round2(value: f32) -> f32 {
    libm::roundf(value * 100.0) / 100.0
}

/// Sliding window of the most recent `N` readings
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - iteration yields readings oldest first
///
/// ## Thread Safety
///
/// Not synchronized. `MonitorService` keeps it behind a mutex together with
/// the latest-state slot.
#[derive(Debug, Clone)]
pub struct SensorWindow<const N: usize = WINDOW_CAPACITY> {
    /// Slots, `None` until first written
    data: [Option<Reading>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Readings currently held
    len: usize,
}

impl<const N: usize> SensorWindow<N> {
    /// Empty window
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Append a reading, evicting the oldest when full
    ///
    /// Returns the evicted reading, if any.
    pub fn record(&mut self, reading: Reading) -> Option<Reading> {
        if N == 0 {
            return Some(reading);
        }

        let evicted = if self.is_full() { self.data[self.write_pos].take() } else { None };

        self.data[self.write_pos] = Some(reading);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }

        evicted
    }

    /// Mean of each parameter across all held readings
    pub fn average(&self) -> WindowResult<Averages> {
        if self.is_empty() {
            return Err(WindowError::InsufficientData { required: 1, available: 0 });
        }

        let (mut temperature, mut oxygen, mut ph) = (0.0f64, 0.0f64, 0.0f64);
        for reading in self.iter() {
            temperature += f64::from(reading.temperature);
            oxygen += f64::from(reading.dissolved_oxygen);
            ph += f64::from(reading.ph);
        }

        let count = self.len as f64;
        Ok(Averages {
            temperature: (temperature / count) as f32,
            dissolved_oxygen: (oxygen / count) as f32,
            ph: (ph / count) as f32,
        })
    }

    /// Number of held readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the window holds no readings
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the next record will evict
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of readings held
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent reading
    pub fn last(&self) -> Option<&Reading> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Oldest reading still held
    pub fn first(&self) -> Option<&Reading> {
        self.get(0)
    }

    /// Milliseconds between the oldest and newest reading
    pub fn span_ms(&self) -> u64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.timestamp.saturating_sub(first.timestamp),
            _ => 0,
        }
    }

    /// Iterate over readings from oldest to newest
    pub fn iter(&self) -> SensorWindowIter<'_, N> {
        SensorWindowIter { window: self, index: 0 }
    }

    /// Drop all readings
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Reading by logical index (0 = oldest)
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2, full)
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    fn get(&self, index: usize) -> Option<&Reading> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Oldest-first iterator over a window
pub struct SensorWindowIter<'a, const N: usize> {
    window: &'a SensorWindow<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for SensorWindowIter<'a, N> {
    type Item = &'a Reading;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.window.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> IntoIterator for &'a SensorWindow<N> {
    type Item = &'a Reading;
    type IntoIter = SensorWindowIter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const N: usize> Default for SensorWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
