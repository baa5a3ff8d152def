/// Tracking confidence saturation point: consecutive successful filter
/// updates beyond this no longer raise confidence.
pub const MAX_CONFIDENCE: u8 = 4;

/// [TrackingState] is the sequential filter lifecycle.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// Filter is not running: awaiting two consecutive valid cold start
    /// epochs to (re)bootstrap.
    #[default]
    NotTracking,

    /// Filter freshly (re)initialized, first update still pending.
    Bootstrapped,

    /// Filter tracking. Confidence counts consecutive successful updates
    /// since bootstrap, saturating at [MAX_CONFIDENCE].
    Tracking(u8),
}

impl TrackingState {
    /// True when the filter has at least one successful update behind it
    /// and is authoritative for the published solution.
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking(_))
    }

    /// True whenever the filter participates in the epoch's update
    /// (bootstrapped or already tracking).
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::NotTracking)
    }

    /// (Re)enters the lifecycle after a filter reset.
    pub fn bootstrap(&mut self) {
        *self = Self::Bootstrapped;
    }

    /// Records a successful filter update. No effect while not running.
    pub fn advance(&mut self) {
        *self = match *self {
            Self::NotTracking => Self::NotTracking,
            Self::Bootstrapped => Self::Tracking(1),
            Self::Tracking(confidence) => Self::Tracking((confidence + 1).min(MAX_CONFIDENCE)),
        };
    }

    /// Drops the filter after a failed update, forcing a full re-bootstrap.
    /// There is no gradual confidence decay.
    pub fn demote(&mut self) {
        *self = Self::NotTracking;
    }

    /// Integer view of the lifecycle: -1 not running, 0 bootstrapped,
    /// 1..=4 tracking confidence.
    pub fn running_level(&self) -> i8 {
        match self {
            Self::NotTracking => -1,
            Self::Bootstrapped => 0,
            Self::Tracking(confidence) => *confidence as i8,
        }
    }
}

impl std::fmt::Display for TrackingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTracking => write!(f, "not-tracking"),
            Self::Bootstrapped => write!(f, "bootstrapped"),
            Self::Tracking(confidence) => write!(f, "tracking({})", confidence),
        }
    }
}
