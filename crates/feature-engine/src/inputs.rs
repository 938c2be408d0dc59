//! Raw Test Parameters

use serde::{Deserialize, Serialize};

/// Raw soil mix and loading parameters as collected from the input form.
///
/// Fields carry the physical units of the test rig; they are mapped onto
/// the model's [0, 1] scale by [`crate::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Activator content (%)
    pub activator_content: f64,
    /// Pozzolan content (%)
    pub pozzolan_content: f64,
    /// Curing time (days, one of 1, 2, 3)
    pub curing_time: u8,
    /// Vertical stress (kPa)
    pub vertical_stress: f64,
    /// Loading amplitude (mm)
    pub loading_amplitude: f64,
}

impl RawInputs {
    /// Activator content effective within the pozzolan fraction (%).
    ///
    /// Informational only; it is not an input to either regression model.
    pub fn effective_activator_content(&self) -> f64 {
        self.activator_content / 100.0 * self.pozzolan_content
    }
}
