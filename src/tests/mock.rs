//! Scripted estimators standing in for the external solvers.
use std::collections::VecDeque;

use nalgebra::{
    DMatrix, DVector, Matrix3xX, Matrix4, Matrix4xX, Matrix5, Vector3, Vector4, Vector5,
};

use crate::estimator::{ColdStartSolver, SequentialFilter};
use crate::position::LonLatAlt;

pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Base angles emitted by each mock delegate, so tests can tell which
/// estimator served an elevation/azimuth query.
pub const SPP_ELEV_RAD: f64 = 0.25;
pub const SPP_AZIM_RAD: f64 = 0.50;
pub const EKF_ELEV_RAD: f64 = 0.75;
pub const EKF_AZIM_RAD: f64 = 1.00;

/// One scripted cold start outcome.
#[derive(Debug, Clone, Copy)]
pub struct SppEpoch {
    pub solved: bool,
    pub alt_m: f64,
    pub clock_time_m: f64,
}

impl SppEpoch {
    /// Converged solve with plausible altitude.
    pub fn valid(clock_time_m: f64) -> Self {
        Self {
            solved: true,
            alt_m: 250.0,
            clock_time_m,
        }
    }

    /// Converged solve with the given altitude.
    pub fn with_altitude(alt_m: f64) -> Self {
        Self {
            solved: true,
            alt_m,
            clock_time_m: 0.0,
        }
    }

    /// Batch solve failure.
    pub fn failed() -> Self {
        Self {
            solved: false,
            alt_m: 250.0,
            clock_time_m: 0.0,
        }
    }
}

/// Scripted [ColdStartSolver]: pops one [SppEpoch] per solve call.
pub struct SppMock {
    script: VecDeque<SppEpoch>,
    last: SppEpoch,
    pub solve_calls: usize,
    pub position: Vector3<f64>,
    pub state: Vector4<f64>,
    pub covariance: Matrix4<f64>,
}

impl SppMock {
    pub fn with_script(epochs: &[SppEpoch]) -> Self {
        Self {
            script: epochs.iter().copied().collect(),
            last: SppEpoch::failed(),
            solve_calls: 0,
            position: Vector3::new(4157.0e3, 666.0e3, 4775.0e3),
            state: Vector4::new(4157.0e3, 666.0e3, 4775.0e3, 1500.0),
            covariance: Matrix4::from_fn(|i, j| if i == j { 2.0 + i as f64 } else { 0.5 }),
        }
    }
}

impl ColdStartSolver for SppMock {
    fn solve(&mut self, geometry: &Matrix4xX<f64>, weights: &DMatrix<f64>) -> bool {
        assert_eq!(geometry.ncols(), weights.nrows());
        self.solve_calls += 1;
        self.last = self.script.pop_front().expect("spp script exhausted");
        self.last.solved
    }

    fn llh(&self) -> LonLatAlt {
        LonLatAlt::new(9.1, 48.7, self.last.alt_m)
    }

    fn clock_time(&self) -> f64 {
        self.last.clock_time_m
    }

    fn speed_of_light(&self) -> f64 {
        SPEED_OF_LIGHT_M_S
    }

    fn position(&self) -> Vector3<f64> {
        self.position
    }

    fn state(&self) -> Vector4<f64> {
        self.state
    }

    fn covariance(&self) -> Matrix4<f64> {
        self.covariance
    }

    fn mod_gpsweek(&self, dt: f64) -> f64 {
        dt
    }

    fn for_each_elev_azim<F: FnMut(usize, f64, f64)>(&self, sv: &Matrix3xX<f64>, mut func: F) {
        for i_sv in 0..sv.ncols() {
            func(
                i_sv,
                SPP_ELEV_RAD + 0.01 * i_sv as f64,
                SPP_AZIM_RAD + 0.01 * i_sv as f64,
            );
        }
    }
}

/// Scripted [SequentialFilter]: pops one update outcome per call, records
/// every reset and elapsed interval it was given.
pub struct EkfMock {
    script: VecDeque<bool>,
    pub resets: Vec<(Vector5<f64>, Matrix5<f64>)>,
    pub intervals: Vec<f64>,
    pub state: Vector5<f64>,
    pub llh: LonLatAlt,
    pub clock_time_m: f64,
}

impl EkfMock {
    pub fn with_script(outcomes: &[bool]) -> Self {
        Self {
            script: outcomes.iter().copied().collect(),
            resets: Vec::new(),
            intervals: Vec::new(),
            state: Vector5::zeros(),
            llh: LonLatAlt::new(9.2, 48.8, 260.0),
            clock_time_m: SPEED_OF_LIGHT_M_S * 0.125,
        }
    }
}

impl SequentialFilter for EkfMock {
    fn reset(&mut self, state: Vector5<f64>, covariance: Matrix5<f64>) {
        self.state = state;
        self.resets.push((state, covariance));
    }

    fn update(&mut self, geometry: &Matrix4xX<f64>, weights: &DVector<f64>, dt_s: f64) -> bool {
        assert_eq!(geometry.ncols(), weights.len());
        self.intervals.push(dt_s);
        self.script.pop_front().expect("ekf script exhausted")
    }

    fn llh(&self) -> LonLatAlt {
        self.llh
    }

    fn clock_time(&self) -> f64 {
        self.clock_time_m
    }

    fn speed_of_light(&self) -> f64 {
        SPEED_OF_LIGHT_M_S
    }

    fn state(&self, index: usize) -> f64 {
        self.state[index]
    }

    fn for_each_elev_azim<F: FnMut(usize, f64, f64)>(&self, sv: &Matrix3xX<f64>, mut func: F) {
        for i_sv in 0..sv.ncols() {
            func(
                i_sv,
                EKF_ELEV_RAD + 0.01 * i_sv as f64,
                EKF_AZIM_RAD + 0.01 * i_sv as f64,
            );
        }
    }
}
