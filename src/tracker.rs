//! Hybrid position fix tracker
use log::{debug, info, warn};

use nalgebra::{DMatrix, DVector, Matrix3xX, Matrix4xX, Matrix5, Vector3, Vector5};

use crate::{
    cfg::Config,
    estimator::{ColdStartSolver, SequentialFilter},
    history::PreviousCurrent,
    position::{ElevationAzimuth, LonLatAlt},
    ticks::{self, TickCounter},
    tracking::TrackingState,
    weights::normalize_weights,
};

/// Plausible altitude window for a batch solution [m]. Solutions outside
/// are degenerate geometry artifacts and never published.
const MIN_PLAUSIBLE_ALT_M: f64 = -100.0;
const MAX_PLAUSIBLE_ALT_M: f64 = 9000.0;

/// Clock drift dimension of the filter state vector.
const CLOCK_DRIFT_INDEX: usize = 4;

/// [FixTracker] turns per epoch satellite geometry and weights into a
/// continuously updated position, receiver clock and oscillator drift
/// estimate. Each epoch runs the batch cold start solver; once two
/// consecutive cold start fixes agree, the sequential filter is bootstrapped
/// from them and takes over steady state tracking, falling back to
/// re-bootstrap whenever one of its updates fails. Readers query the last
/// published solution at any time, regardless of which estimator currently
/// drives it.
pub struct FixTracker<S, F> {
    /// Tracker parametrization
    pub cfg: Config,
    /// Batch cold start solver
    spp: S,
    /// Sequential filter
    ekf: F,
    /// Sample counter interpretation
    ticks: TickCounter,
    /// Published ECEF position [m]
    pos: Vector3<f64>,
    /// Published receiver time [s]
    t_rx: f64,
    /// Published fractional oscillator frequency offset.
    /// -1.0 until first estimated.
    osc_corr: f64,
    /// Published geodetic coordinates
    llh: LonLatAlt,
    /// Latched on the first plausible fix, never cleared
    pos_valid: bool,
    /// Cold start validity, current and previous epoch
    spp_state: PreviousCurrent<bool>,
    /// Cold start sample counter history
    spp_ticks: PreviousCurrent<u64>,
    /// Filter sample counter history. The previous slot only advances on
    /// bootstrap or on a successful update, so a failed epoch does not
    /// consume the elapsed interval.
    ekf_ticks: PreviousCurrent<u64>,
    /// Cold start receiver clock time history [range equivalent meters]
    clock_time: PreviousCurrent<f64>,
    /// Filter lifecycle
    tracking: TrackingState,
}

impl<S: ColdStartSolver, F: SequentialFilter> FixTracker<S, F> {
    /// Builds a new [FixTracker] from a validated [Config] and the two
    /// external estimators.
    pub fn new(cfg: Config, spp: S, ekf: F) -> Self {
        Self {
            spp,
            ekf,
            ticks: TickCounter::new(cfg.osc_freq_hz),
            cfg,
            pos: Vector3::zeros(),
            t_rx: 0.0,
            osc_corr: -1.0,
            llh: LonLatAlt::default(),
            pos_valid: false,
            spp_state: PreviousCurrent::new(false),
            spp_ticks: PreviousCurrent::new(0),
            ekf_ticks: PreviousCurrent::new(0),
            clock_time: PreviousCurrent::new(0.0),
            tracking: TrackingState::NotTracking,
        }
    }

    /// True once any epoch published a position. Latched for the tracker's
    /// lifetime: a later invalid epoch does not clear it, the last good
    /// solution remains readable.
    pub fn pos_valid(&self) -> bool {
        self.pos_valid
    }

    /// True when the current epoch's cold start solution is valid.
    pub fn spp_valid(&self) -> bool {
        self.spp_state.current()
    }

    /// True when the filter has at least one successful update behind it.
    pub fn ekf_valid(&self) -> bool {
        self.tracking.is_tracking()
    }

    /// Filter lifecycle state.
    pub fn tracking_state(&self) -> TrackingState {
        self.tracking
    }

    /// Last published ECEF position [m]. Stale unless [Self::pos_valid].
    pub fn position(&self) -> Vector3<f64> {
        self.pos
    }

    /// Last published receiver time [s]. Stale unless [Self::pos_valid].
    pub fn receiver_time(&self) -> f64 {
        self.t_rx
    }

    /// Estimated fractional frequency offset of the local oscillator.
    /// -1.0 until two consecutive valid cold start epochs occurred.
    pub fn oscillator_correction(&self) -> f64 {
        self.osc_corr
    }

    /// Last published geodetic coordinates. Stale unless [Self::pos_valid].
    pub fn geodetic(&self) -> LonLatAlt {
        self.llh
    }

    /// Per satellite elevation and azimuth, in degrees, one pair per column
    /// of the 3xN satellite position matrix, in column order. Delegated to
    /// the filter when it is tracking, to the cold start solver when only
    /// its fix is valid, empty otherwise.
    pub fn elevation_azimuth(&self, sv: &Matrix3xX<f64>) -> Vec<ElevationAzimuth> {
        if !self.spp_valid() && !self.ekf_valid() {
            return Vec::new();
        }

        let mut angles = vec![ElevationAzimuth::default(); sv.ncols()];
        if self.ekf_valid() {
            self.ekf.for_each_elev_azim(sv, |i_sv, elev_rad, azim_rad| {
                angles[i_sv] = ElevationAzimuth::from_radians(elev_rad, azim_rad);
            });
        } else {
            self.spp.for_each_elev_azim(sv, |i_sv, elev_rad, azim_rad| {
                angles[i_sv] = ElevationAzimuth::from_radians(elev_rad, azim_rad);
            });
        }
        angles
    }

    /// Processes one measurement epoch.
    /// ## Input
    /// - geometry: 4xN matrix, three spatial components plus clock bias row,
    ///   one column per satellite
    /// - weights: length N per satellite weight vector, normalized in place
    ///   before reaching the estimators
    /// - tick: hardware sample counter read, 48 significant bits
    /// ## Returns
    /// false only when N == 0 (epoch skipped, nothing mutated); true
    /// otherwise, whatever the internal estimator outcomes. Those are
    /// reported through the validity flags.
    pub fn solve(&mut self, geometry: &Matrix4xX<f64>, mut weights: DVector<f64>, tick: u64) -> bool {
        assert_eq!(
            geometry.ncols(),
            weights.len(),
            "geometry/weight dimension mismatch"
        );

        let nsv = geometry.ncols();
        if nsv == 0 {
            return false;
        }

        let tick = ticks::mask(tick);

        normalize_weights(&mut weights, self.cfg.uere);

        // sample counter history
        self.spp_ticks.push(tick);
        self.ekf_ticks.set_current(tick);

        // cold start, re-solved from scratch each epoch
        let solved = self.spp.solve(geometry, &DMatrix::from_diagonal(&weights));

        let altitude = self.spp.llh().alt_m;
        let plausible =
            solved && altitude > MIN_PLAUSIBLE_ALT_M && altitude < MAX_PLAUSIBLE_ALT_M;

        self.spp_state.push(plausible);
        self.clock_time.push(self.spp.clock_time());

        if plausible {
            self.llh = self.spp.llh();
            self.t_rx = self.spp.clock_time() / self.spp.speed_of_light();
            self.pos = self.spp.position();
            self.pos_valid = true;
            debug!("cold start fix: {}", self.llh);
        } else if solved {
            debug!("cold start fix rejected: implausible altitude {:.1}m", altitude);
        } else {
            debug!("cold start solve failed");
        }

        // two consecutive valid cold starts arm the filter
        if self.tracking == TrackingState::NotTracking
            && self.spp_state.current()
            && self.spp_state.previous()
        {
            self.bootstrap();
        }

        if self.tracking.is_running() {
            let dt = self
                .ticks
                .elapsed_since(self.ekf_ticks.current(), self.ekf_ticks.previous());

            if self.ekf.update(geometry, &weights, dt.to_seconds()) {
                self.ekf_ticks.commit();
                self.tracking.advance();
                self.llh = self.ekf.llh();
                self.t_rx = self.ekf.clock_time() / self.ekf.speed_of_light();
                self.osc_corr =
                    self.ekf.state(CLOCK_DRIFT_INDEX) / self.ekf.speed_of_light();
                // position stays on the batch solution: only the clock
                // terms are filtered
                self.pos = self.spp.position();
                debug!("filter update: {} ({})", self.llh, self.tracking);
            } else {
                warn!("filter update failed: back to cold start");
                self.tracking.demote();
            }
        }

        true
    }

    /// Seeds the filter from the last two cold start solutions: their clock
    /// time delta over the elapsed tick interval estimates the oscillator
    /// drift, which extends the cold start state and covariance into the
    /// filter's 5 dimensional space.
    fn bootstrap(&mut self) {
        let dt = self
            .ticks
            .elapsed_since(self.spp_ticks.current(), self.spp_ticks.previous());

        let dt_clock =
            self.spp.mod_gpsweek(self.clock_time.current() - self.clock_time.previous());

        self.osc_corr = dt_clock / self.spp.speed_of_light() / dt.to_seconds();

        let mut state = Vector5::zeros();
        state.fixed_rows_mut::<4>(0).copy_from(&self.spp.state());
        state[CLOCK_DRIFT_INDEX] = self.osc_corr * self.ekf.speed_of_light();

        let mut covariance = Matrix5::zeros();
        covariance
            .fixed_view_mut::<4, 4>(0, 0)
            .copy_from(&self.spp.covariance());
        covariance[(CLOCK_DRIFT_INDEX, CLOCK_DRIFT_INDEX)] = 1.0;

        self.ekf.reset(state, covariance);
        self.ekf_ticks.commit();
        self.tracking.bootstrap();

        info!(
            "filter bootstrapped: osc_corr={:.3E} dt={}",
            self.osc_corr, dt
        );
    }
}

#[cfg(test)]
impl<S, F> FixTracker<S, F> {
    pub(crate) fn estimators(&self) -> (&S, &F) {
        (&self.spp, &self.ekf)
    }
}
