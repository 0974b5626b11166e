//! Position tracking across the seam of a circular sensor
//!
//! A Ring reports positions in [0, 1) that jump when a finger crosses the
//! seam. [`RingTracker`] counts those crossings so that consecutive
//! readings form a continuous position.

use crate::traits::TouchSensor;

/// Readings above this are close to the seam from below
pub const SEAM_HIGH: f32 = 0.92;

/// Readings below this are close to the seam from above
pub const SEAM_LOW: f32 = 0.08;

/// Unwraps Ring positions into a revolution count
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingTracker {
    wraps: u32,
    revolutions: u32,
    last: Option<f32>,
    size: f32,
}

impl RingTracker {
    /// Track up to `wraps` revolutions before folding back to 0
    pub fn new(wraps: u32) -> Self {
        Self {
            wraps: wraps.max(1),
            revolutions: 0,
            last: None,
            size: 0.0,
        }
    }

    /// Feed a position in [0, 1) and get the unwrapped position
    ///
    /// The first reading after [`RingTracker::release`] never counts as a
    /// crossing.
    pub fn update(&mut self, position: f32) -> f32 {
        if let Some(last) = self.last {
            if last > SEAM_HIGH && position < SEAM_LOW {
                self.revolutions = (self.revolutions + 1) % self.wraps;
            } else if position > SEAM_HIGH && last < SEAM_LOW {
                self.revolutions = self.revolutions.checked_sub(1).unwrap_or(self.wraps - 1);
            }
        }
        self.last = Some(position);
        self.position()
    }

    /// Forget the last reading, keeping the revolution count
    pub fn release(&mut self) {
        self.last = None;
    }

    /// Read the sensor and update from its compound touch
    ///
    /// Returns the unwrapped position, or `None` when nothing is touching.
    /// Without a touch the previous reading is kept so a finger lifted
    /// near the seam still unwraps correctly when it lands again.
    pub fn poll<S: TouchSensor>(&mut self, sensor: &mut S) -> Result<Option<f32>, S::Error> {
        sensor.read_touches()?;
        if !sensor.is_touched() {
            return Ok(None);
        }
        let position = self.update(sensor.compound_touch_location());
        self.size = sensor.compound_touch_size();
        Ok(Some(position))
    }

    /// Completed revolutions, modulo the configured wrap count
    pub fn revolutions(&self) -> u32 {
        self.revolutions
    }

    /// Last unwrapped position, 0 before any reading
    pub fn position(&self) -> f32 {
        self.last.unwrap_or(0.0) + self.revolutions as f32
    }

    /// Compound size from the last polled touch
    pub fn size(&self) -> f32 {
        self.size
    }
}
