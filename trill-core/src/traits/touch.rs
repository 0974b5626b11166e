//! Touch sensor trait

use crate::decode::{mean_of, DecodeError, TouchSet};

/// A sensor that reports discrete touches along one primary axis
///
/// Implementations own the bus; the accessors only look at the last
/// frame read by [`TouchSensor::read_touches`].
pub trait TouchSensor {
    /// Error type for bus reads
    type Error;

    /// Read a fresh frame of touches
    fn read_touches(&mut self) -> Result<TouchSet, Self::Error>;

    /// Touches on the primary axis in the last frame
    fn number_of_touches(&self) -> u8;

    /// Normalized location of touch `touch`
    fn touch_location(&self, touch: u8) -> Result<f32, DecodeError>;

    /// Normalized size of touch `touch`
    fn touch_size(&self, touch: u8) -> Result<f32, DecodeError>;

    /// Whether anything is touching the sensor
    fn is_touched(&self) -> bool {
        self.number_of_touches() > 0
    }

    /// Mean location of all touches, 0 with no touches
    fn compound_touch_location(&self) -> f32 {
        mean_of(self.number_of_touches(), |i| self.touch_location(i))
    }

    /// Mean size of all touches, 0 with no touches
    fn compound_touch_size(&self) -> f32 {
        mean_of(self.number_of_touches(), |i| self.touch_size(i))
    }
}
