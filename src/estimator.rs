//! Interfaces of the two external estimators driven by the tracker.
use nalgebra::{DMatrix, DVector, Matrix3xX, Matrix4, Matrix4xX, Matrix5, Vector3, Vector4, Vector5};

use crate::position::LonLatAlt;

/// [ColdStartSolver] is the batch least squares estimator, re-solved from
/// scratch on every epoch: 4xN geometry matrix (three spatial components
/// plus clock bias row, one column per satellite) against an NxN diagonal
/// weight matrix. Accessors read the most recent solution and are only
/// meaningful after a successful [ColdStartSolver::solve].
pub trait ColdStartSolver {
    /// Attempts a batch solve for this epoch. Returns true on convergence.
    fn solve(&mut self, geometry: &Matrix4xX<f64>, weights: &DMatrix<f64>) -> bool;

    /// Geodetic coordinates of the last solution.
    fn llh(&self) -> LonLatAlt;

    /// Receiver clock time of the last solution, in range equivalent meters.
    fn clock_time(&self) -> f64;

    /// Speed of light constant used by this solver [m/s].
    fn speed_of_light(&self) -> f64;

    /// ECEF position of the last solution [m].
    fn position(&self) -> Vector3<f64>;

    /// Position / clock bias state vector of the last solution.
    fn state(&self) -> Vector4<f64>;

    /// Covariance of [ColdStartSolver::state].
    fn covariance(&self) -> Matrix4<f64>;

    /// Reduces a clock time difference (range equivalent meters) modulo one
    /// GPS week.
    fn mod_gpsweek(&self, dt: f64) -> f64;

    /// Invokes `func(index, elev_rad, azim_rad)` for each column of the 3xN
    /// satellite position matrix, from the last resolved position.
    fn for_each_elev_azim<F: FnMut(usize, f64, f64)>(&self, sv: &Matrix3xX<f64>, func: F);
}

/// [SequentialFilter] is the steady state tracking estimator. It carries a
/// 5 dimensional state (position, clock bias, clock drift) across epochs and
/// is (re)initialized by the tracker from a pair of consistent cold start
/// solutions.
pub trait SequentialFilter {
    /// Restarts the filter from an external state and covariance.
    fn reset(&mut self, state: Vector5<f64>, covariance: Matrix5<f64>);

    /// Runs one prediction + update cycle, `dt_s` seconds after the previous
    /// successful cycle. Returns true on convergence.
    fn update(&mut self, geometry: &Matrix4xX<f64>, weights: &DVector<f64>, dt_s: f64) -> bool;

    /// Geodetic coordinates of the current filter state.
    fn llh(&self) -> LonLatAlt;

    /// Receiver clock time of the current filter state, in range equivalent
    /// meters.
    fn clock_time(&self) -> f64;

    /// Speed of light constant used by this filter [m/s].
    fn speed_of_light(&self) -> f64;

    /// Reads one dimension of the internal state vector.
    fn state(&self, index: usize) -> f64;

    /// Invokes `func(index, elev_rad, azim_rad)` for each column of the 3xN
    /// satellite position matrix, from the current filter state.
    fn for_each_elev_azim<F: FnMut(usize, f64, f64)>(&self, sv: &Matrix3xX<f64>, func: F);
}
