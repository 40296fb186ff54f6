//! Water-quality readings
//!
//! A [`Reading`] is the unit of intake: one temperature, dissolved oxygen and
//! pH sample stamped with the time it entered the monitor. Readings are only
//! ever constructed through [`Reading::new`], which rejects non-finite values,
//! so everything downstream (window, classifier, state) can assume finite
//! numbers.

use crate::errors::{ReadingError, ReadingResult};
use crate::time::Timestamp;
use crate::traits::Validatable;

/// One water-quality sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reading {
    /// Water temperature in °C
    pub temperature: f32,
    /// Dissolved oxygen in mg/L
    pub dissolved_oxygen: f32,
    /// pH
    pub ph: f32,
    /// Milliseconds since the Unix epoch
    pub timestamp: Timestamp,
}

impl Reading {
    /// Validate and build a reading
    pub fn new(
        temperature: f32,
        dissolved_oxygen: f32,
        ph: f32,
        timestamp: Timestamp,
    ) -> ReadingResult<Self> {
        check_finite("temperature", temperature)?;
        check_finite("dissolved_oxygen", dissolved_oxygen)?;
        check_finite("ph", ph)?;

        Ok(Self { temperature, dissolved_oxygen, ph, timestamp })
    }

    /// Parameters as `(temperature, dissolved_oxygen, ph)`
    pub fn parameters(&self) -> (f32, f32, f32) {
        (self.temperature, self.dissolved_oxygen, self.ph)
    }

    /// Timestamp as an RFC 3339 string
    #[cfg(feature = "std")]
    pub fn recorded_at(&self) -> Option<String> {
        crate::time::to_rfc3339(self.timestamp)
    }
}

fn check_finite(field: &'static str, value: f32) -> ReadingResult<()> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(ReadingError::InvalidValue { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_finite_values() {
        let reading = Reading::new(27.5, 5.2, 7.1, 1000).unwrap();
        assert_eq!(reading.parameters(), (27.5, 5.2, 7.1));
        assert_eq!(reading.timestamp, 1000);
    }

    #[test]
    fn out_of_domain_values_are_still_readings() {
        // Bounds are the model's business, not intake's
        assert!(Reading::new(50.0, 25.0, 1.0, 0).is_ok());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            Reading::new(f32::NAN, 5.0, 7.0, 0),
            Err(ReadingError::InvalidValue { field: "temperature" })
        );
        assert_eq!(
            Reading::new(25.0, f32::INFINITY, 7.0, 0),
            Err(ReadingError::InvalidValue { field: "dissolved_oxygen" })
        );
        assert_eq!(
            Reading::new(25.0, 5.0, f32::NEG_INFINITY, 0),
            Err(ReadingError::InvalidValue { field: "ph" })
        );
    }

    #[test]
    fn recorded_at_is_rfc3339() {
        let reading = Reading::new(25.0, 5.0, 7.0, 0).unwrap();
        assert_eq!(reading.recorded_at().as_deref(), Some("1970-01-01T00:00:00.000Z"));
    }
}
