//! Rolling Window Sizing

/// Readings kept for the rolling average.
///
/// One minute of history at the node's 5 second reporting interval.
pub const WINDOW_CAPACITY: usize = 12;

/// Expected interval between sensor reports (milliseconds).
pub const SAMPLE_INTERVAL_MS: u64 = 5_000;
