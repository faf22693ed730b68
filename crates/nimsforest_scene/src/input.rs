//! Pointer gesture state machine.
//!
//! Disambiguates click from drag, independent of what is under the pointer.
//!
//! ## States
//!
//! - **IDLE**: no button held.
//! - **PRESSED**: button down, not yet confirmed as a drag.
//! - **DRAGGING**: movement exceeded the threshold; every further move pans.
//!
//! A pointer-up from PRESSED is a click. A pointer-up from DRAGGING is not -
//! panning must never change the selection. All transitions are pure local
//! state over numeric input; this component cannot fail.

use nimsforest_model::ScreenVec;

/// Movement past this many pixels on either axis turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 2.0;

/// Gesture machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No button held.
    Idle,
    /// Button down, below the drag threshold.
    Pressed,
    /// Button down, threshold exceeded.
    Dragging,
}

/// What an input event resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Nothing actionable.
    None,
    /// Pan the camera by this pointer delta.
    Pan {
        /// Horizontal delta since the last observed position.
        dx: f32,
        /// Vertical delta since the last observed position.
        dy: f32,
    },
    /// A confirmed click at this screen position.
    Click {
        /// Screen-space click position.
        position: ScreenVec,
    },
}

/// Tracks one pointer through press / move / release cycles.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    phase: GesturePhase,
    press: ScreenVec,
    last: ScreenVec,
    threshold: f32,
}

impl GestureTracker {
    /// Creates a tracker with the default drag threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(DRAG_THRESHOLD_PX)
    }

    /// Creates a tracker with an explicit drag threshold.
    #[must_use]
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            phase: GesturePhase::Idle,
            press: ScreenVec::ZERO,
            last: ScreenVec::ZERO,
            threshold,
        }
    }

    /// Current machine state.
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Records a button press at a screen position.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.phase = GesturePhase::Pressed;
        self.press = ScreenVec::new(x, y);
        self.last = self.press;
    }

    /// Records pointer movement. `is_down` reflects the button state as
    /// reported by the event source; a move without the button resets a
    /// half-finished gesture (the release happened outside our surface).
    pub fn pointer_move(&mut self, x: f32, y: f32, is_down: bool) -> GestureEvent {
        if !is_down {
            self.phase = GesturePhase::Idle;
            return GestureEvent::None;
        }

        match self.phase {
            GesturePhase::Idle => GestureEvent::None,
            GesturePhase::Pressed => {
                let exceeded = (x - self.press.x).abs() > self.threshold
                    || (y - self.press.y).abs() > self.threshold;
                let event = if exceeded {
                    self.phase = GesturePhase::Dragging;
                    tracing::debug!("gesture: press confirmed as drag");
                    GestureEvent::Pan {
                        dx: x - self.last.x,
                        dy: y - self.last.y,
                    }
                } else {
                    GestureEvent::None
                };
                self.last = ScreenVec::new(x, y);
                event
            }
            GesturePhase::Dragging => {
                let event = GestureEvent::Pan {
                    dx: x - self.last.x,
                    dy: y - self.last.y,
                };
                self.last = ScreenVec::new(x, y);
                event
            }
        }
    }

    /// Records a button release. Returns a click only when the press never
    /// became a drag.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> GestureEvent {
        let event = match self.phase {
            GesturePhase::Pressed => GestureEvent::Click {
                position: ScreenVec::new(x, y),
            },
            GesturePhase::Idle | GesturePhase::Dragging => GestureEvent::None,
        };
        self.phase = GesturePhase::Idle;
        event
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}
