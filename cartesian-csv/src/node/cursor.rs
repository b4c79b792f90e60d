//! Iteration cursor and reset debouncing.
//!
//! The reset input is level-triggered by the host but acts on edges here:
//!
//! | latch  | reset | effect                                        | latch after |
//! |--------|-------|-----------------------------------------------|-------------|
//! | idle   | off   | none                                          | idle        |
//! | idle   | on    | rebuild rows, cursor to 0                     | armed       |
//! | armed  | on    | cursor to 0 (rebuild only if stale)           | armed       |
//! | armed  | off   | none                                          | idle        |
//!
//! Any rebuild (reset edge or stale cache) arms the latch; the latch is
//! released at the end of every call whose reset input is off.

/// Debounce state of the reset input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetLatch {
    #[default]
    Idle,
    Armed,
}

impl ResetLatch {
    pub fn is_armed(&self) -> bool {
        matches!(self, ResetLatch::Armed)
    }

    /// A reset that should trigger a rebuild: asserted now, not on the previous call.
    pub fn is_edge(&self, reset: bool) -> bool {
        reset && !self.is_armed()
    }

    /// A reset held across consecutive calls.
    pub fn is_held(&self, reset: bool) -> bool {
        reset && self.is_armed()
    }

    pub fn arm(&mut self) {
        *self = ResetLatch::Armed;
    }

    /// Release the latch unless reset is still asserted.
    pub fn settle(&mut self, reset: bool) {
        if !reset {
            *self = ResetLatch::Idle;
        }
    }
}

/// One emitted row position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index emitted by this call
    pub last_row: usize,
    /// Index the next call will emit
    pub next_row: usize,
    /// Whether `last_row` is the final row before wrap-around
    pub no_more_rows: bool,
}

/// Position in the combined row set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn jump(&mut self, index: usize) {
        self.position = index;
    }

    /// Emit the current position and advance by one, wrapping at `len`.
    ///
    /// `len` must be non-zero.
    pub fn step(&mut self, len: usize) -> Step {
        debug_assert!(len > 0);
        let last_row = self.position % len;
        let no_more_rows = last_row + 1 >= len;
        self.position = (last_row + 1) % len;
        Step {
            last_row,
            next_row: self.position,
            no_more_rows,
        }
    }
}
