/// [PreviousCurrent] is a two slot history buffer: the current epoch's value
/// and the prior one. Replaces manual slot swapping with a single
/// shift-before-update operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PreviousCurrent<T> {
    current: T,
    previous: T,
}

impl<T: Copy> PreviousCurrent<T> {
    /// Builds a new [PreviousCurrent] with both slots set to `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            previous: initial,
        }
    }

    /// Shifts current into previous, then stores `value` as current.
    pub fn push(&mut self, value: T) {
        self.previous = self.current;
        self.current = value;
    }

    /// Overwrites the current slot, leaving previous untouched.
    pub fn set_current(&mut self, value: T) {
        self.current = value;
    }

    /// Advances previous to current. Used by histories whose previous slot
    /// only moves on confirmed events.
    pub fn commit(&mut self) {
        self.previous = self.current;
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn previous(&self) -> T {
        self.previous
    }
}
