//! Button debounce automaton
//!
//! Turns an instantaneous sample taken once per poll into a stable
//! pressed/released signal. A change is confirmed only after it has been
//! observed continuously for the confirmation window; a single contrary
//! sample while pending drops back to the stable state it came from.
//!
//! | State           | sample pressed              | sample released             |
//! |-----------------|-----------------------------|-----------------------------|
//! | Released        | PressedPending, reset timer | stay                        |
//! | PressedPending  | Pressed once window elapsed | Released                    |
//! | Pressed         | stay                        | ReleasedPending, reset timer|
//! | ReleasedPending | Pressed                     | Released once window elapsed|
//!
//! There is no timer behind this: elapsed time is computed from the
//! timestamp handed to [`DebounceSwitch::poll`]. A caller that stops polling
//! freezes the automaton.

/// Default confirmation window in milliseconds
pub const DEFAULT_CONFIRM_WINDOW_MS: u32 = 30;

/// Debounce automaton states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Stable, not pressed
    #[default]
    Released,
    /// Press observed, waiting for the window to elapse
    PressedPending,
    /// Stable, pressed
    Pressed,
    /// Release observed, waiting for the window to elapse
    ReleasedPending,
}

/// Confirmed edge reported by [`DebounceSwitch::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Transition into `Pressed` confirmed
    Pressed,
    /// Transition into `Released` confirmed
    Released,
}

/// Debounced button
#[derive(Debug, Clone)]
pub struct DebounceSwitch {
    state: DebounceState,
    /// Time of entry into the current pending state
    last_transition_ms: u32,
    confirm_window_ms: u32,
    on_pressed: Option<fn()>,
    on_released: Option<fn()>,
}

impl Default for DebounceSwitch {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_WINDOW_MS)
    }
}

impl DebounceSwitch {
    /// Create a released switch with the given confirmation window
    pub const fn new(confirm_window_ms: u32) -> Self {
        Self {
            state: DebounceState::Released,
            last_transition_ms: 0,
            confirm_window_ms,
            on_pressed: None,
            on_released: None,
        }
    }

    /// Advance the automaton by one evaluation
    ///
    /// # Arguments
    /// - `pressed`: instantaneous hardware sample
    /// - `now_ms`: current time from a wrapping millisecond clock
    ///
    /// Returns the confirmed edge, if this poll confirmed one. The matching
    /// callback has already run by the time this returns.
    pub fn poll(&mut self, pressed: bool, now_ms: u32) -> Option<Edge> {
        use DebounceState::*;

        let elapsed = now_ms.wrapping_sub(self.last_transition_ms);
        let settled = elapsed >= self.confirm_window_ms;

        let (next, edge) = match (self.state, pressed) {
            (Released, true) => {
                self.last_transition_ms = now_ms;
                (PressedPending, None)
            }
            (Released, false) => (Released, None),

            (PressedPending, true) if settled => (Pressed, Some(Edge::Pressed)),
            (PressedPending, true) => (PressedPending, None),
            (PressedPending, false) => (Released, None),

            (Pressed, true) => (Pressed, None),
            (Pressed, false) => {
                self.last_transition_ms = now_ms;
                (ReleasedPending, None)
            }

            (ReleasedPending, true) => (Pressed, None),
            (ReleasedPending, false) if settled => (Released, Some(Edge::Released)),
            (ReleasedPending, false) => (ReleasedPending, None),
        };

        self.state = next;

        match edge {
            Some(Edge::Pressed) => {
                if let Some(callback) = self.on_pressed {
                    callback();
                }
            }
            Some(Edge::Released) => {
                if let Some(callback) = self.on_released {
                    callback();
                }
            }
            None => {}
        }

        edge
    }

    /// Logical pressed state
    ///
    /// A pending release still counts as pressed: the release has not been
    /// confirmed yet.
    pub fn is_pressed(&self) -> bool {
        matches!(
            self.state,
            DebounceState::Pressed | DebounceState::ReleasedPending
        )
    }

    /// Logical released state (`!is_pressed()`)
    pub fn is_released(&self) -> bool {
        !self.is_pressed()
    }

    /// Current automaton state
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Confirmation window in milliseconds
    pub fn confirm_window_ms(&self) -> u32 {
        self.confirm_window_ms
    }

    /// Change the confirmation window
    pub fn set_confirm_window_ms(&mut self, window_ms: u32) {
        self.confirm_window_ms = window_ms;
    }

    /// Register the press callback; `None` deregisters it
    pub fn on_pressed(&mut self, callback: Option<fn()>) {
        self.on_pressed = callback;
    }

    /// Register the release callback; `None` deregisters it
    pub fn on_released(&mut self, callback: Option<fn()>) {
        self.on_released = callback;
    }
}
