#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod error;
mod estimator;
mod history;
mod position;
mod ticks;
mod tracker;
mod tracking;
mod weights;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::Config;
    pub use crate::error::Error;
    pub use crate::estimator::{ColdStartSolver, SequentialFilter};
    pub use crate::position::{ElevationAzimuth, LonLatAlt};
    pub use crate::ticks::TickCounter;
    pub use crate::tracker::FixTracker;
    pub use crate::tracking::TrackingState;
    // re-export
    pub use hifitime::Duration;
    pub use nalgebra::{DVector, Matrix3xX, Matrix4xX, Vector3};
}

// pub export
pub use error::Error;
