//! Parameter sets for the two error models.
//!
//! These are plain configuration with documented defaults; the defaults match
//! the tuning used by the trajectory-optimization pipeline that consumes this
//! crate.

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Parameters for the sequential drift model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftParams {
    /// Steepness of the saturating feedback gain; larger values quench the
    /// influence of the previous step's offset sooner
    pub damping_factor: f64,
    /// Fraction of each heading change carried into the injected offset
    pub decay_factor: f64,
}

impl DriftParams {
    /// Create new drift parameters
    pub fn new(damping_factor: f64, decay_factor: f64) -> Self {
        Self {
            damping_factor,
            decay_factor,
        }
    }

    /// Create default parameters suitable for basic simulation
    pub fn default_params() -> Self {
        Self {
            damping_factor: 1.8,
            decay_factor: 0.95,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SimError> {
        ensure_parameter("damping_factor", self.damping_factor)?;
        ensure_parameter("decay_factor", self.decay_factor)?;
        Ok(())
    }
}

impl Default for DriftParams {
    fn default() -> Self {
        Self::default_params()
    }
}

/// Parameters for the windowed oscillation model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationParams {
    /// Peak sideways displacement injected by a full-strength turn
    pub gain: f64,
    /// Exponential decay rate of the oscillation kernel
    pub damping: f64,
    /// Angular frequency of the kernel sinusoid, per sample
    pub frequency: f64,
    /// Sharpness of the tanh turn-weighting curve
    pub non_linearity: f64,
    /// Number of points each turn's ringing spreads across
    pub window_length: usize,
}

impl OscillationParams {
    /// Create new oscillation parameters
    pub fn new(
        gain: f64,
        damping: f64,
        frequency: f64,
        non_linearity: f64,
        window_length: usize,
    ) -> Self {
        Self {
            gain,
            damping,
            frequency,
            non_linearity,
            window_length,
        }
    }

    /// Create default parameters suitable for basic simulation
    pub fn default_params() -> Self {
        Self {
            gain: 5.0,
            damping: 0.25,
            frequency: 1.0,
            non_linearity: 1.0,
            window_length: 60,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SimError> {
        if self.window_length == 0 {
            return Err(SimError::InvalidWindowLength { got: 0 });
        }
        ensure_parameter("gain", self.gain)?;
        ensure_parameter("damping", self.damping)?;
        ensure_parameter("frequency", self.frequency)?;
        ensure_parameter("non_linearity", self.non_linearity)?;
        Ok(())
    }
}

impl Default for OscillationParams {
    fn default() -> Self {
        Self::default_params()
    }
}

fn ensure_parameter(name: &'static str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::InvalidParameter { name, value });
    }
    Ok(())
}
