use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default UERE scale, in meters. Standard single frequency
/// pseudorange error budget.
const fn default_uere() -> f64 {
    6.0
}

/// Default sample counter frequency, in Hz (66.6666 MHz ADC clock).
const fn default_osc_freq() -> f64 {
    66.6666e6
}

/// [Config] gathers the tracker parametrization. Immutable for the
/// tracker's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// User Equivalent Range Error scale, in meters.
    /// Applied to the measurement weights proposed on each epoch.
    #[cfg_attr(feature = "serde", serde(default = "default_uere"))]
    pub uere: f64,

    /// Nominal frequency, in Hz, of the local oscillator driving the
    /// 48 bit hardware sample counter.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "fosc", default = "default_osc_freq")
    )]
    pub osc_freq_hz: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uere: default_uere(),
            osc_freq_hz: default_osc_freq(),
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "uere={}m ", self.uere)?;
        write!(f, "f-osc={}Hz", self.osc_freq_hz)
    }
}

impl Config {
    /// Builds a new [Config] from UERE scale (meters) and nominal
    /// oscillator frequency (Hz), both strictly positive.
    pub fn new(uere: f64, osc_freq_hz: f64) -> Result<Self, Error> {
        if !(uere > 0.0) {
            return Err(Error::InvalidUere);
        }
        if !(osc_freq_hz > 0.0) {
            return Err(Error::InvalidOscFrequency);
        }
        Ok(Self { uere, osc_freq_hz })
    }
}
