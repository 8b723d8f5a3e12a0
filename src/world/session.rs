//! Hold-to-harvest timer
//!
//! One session per player. The session only tracks which object is being
//! charged and for how long; the caller decides which object is eligible
//! each tick and applies the harvest when the session reports completion.

use super::object::ObjectId;

/// Default hold duration
pub const DEFAULT_REQUIRED_MS: f32 = 3000.0;
/// Shortest hold duration accepted
pub const MIN_REQUIRED_MS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    Charging { target: ObjectId, elapsed_ms: f32 },
    /// Harvest fired this tick; back to idle on the next one
    Complete { target: ObjectId },
}

/// Why a charge was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Released,
    OutOfRange,
    TargetChanged,
}

/// Transition reported by `HarvestSession::tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Started(ObjectId),
    Cancelled { target: ObjectId, reason: CancelReason },
    Completed(ObjectId),
}

#[derive(Debug, Clone)]
pub struct HarvestSession {
    state: SessionState,
    required_ms: f32,
}

impl Default for HarvestSession {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_MS)
    }
}

impl HarvestSession {
    /// Create an idle session; durations below 1 ms (or NaN) are clamped
    pub fn new(required_ms: f32) -> Self {
        let required_ms = if required_ms >= MIN_REQUIRED_MS { required_ms } else { MIN_REQUIRED_MS };
        Self { state: SessionState::Idle, required_ms }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn required_ms(&self) -> f32 {
        self.required_ms
    }

    /// Object being charged or just harvested
    pub fn target(&self) -> Option<ObjectId> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Charging { target, .. } | SessionState::Complete { target } => Some(target),
        }
    }

    /// Charge progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        match self.state {
            SessionState::Idle => 0.0,
            SessionState::Charging { elapsed_ms, .. } => (elapsed_ms / self.required_ms).clamp(0.0, 1.0),
            SessionState::Complete { .. } => 1.0,
        }
    }

    /// Drop any charge immediately
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Advance one frame
    ///
    /// `candidate` is the eligible object in range this frame, if any. A
    /// charge starts at zero elapsed on the tick it begins, and completes
    /// exactly once when elapsed reaches the required duration.
    pub fn tick(&mut self, candidate: Option<ObjectId>, interact_held: bool, delta_ms: f32) -> Option<SessionEvent> {
        match self.state {
            SessionState::Complete { .. } => {
                self.state = SessionState::Idle;
                None
            }
            SessionState::Idle => {
                let target = candidate.filter(|_| interact_held)?;
                self.state = SessionState::Charging { target, elapsed_ms: 0.0 };
                Some(SessionEvent::Started(target))
            }
            SessionState::Charging { target, elapsed_ms } => {
                let reason = if !interact_held {
                    Some(CancelReason::Released)
                } else {
                    match candidate {
                        None => Some(CancelReason::OutOfRange),
                        Some(id) if id != target => Some(CancelReason::TargetChanged),
                        Some(_) => None,
                    }
                };
                if let Some(reason) = reason {
                    self.state = SessionState::Idle;
                    return Some(SessionEvent::Cancelled { target, reason });
                }

                let elapsed_ms = elapsed_ms + if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
                if elapsed_ms >= self.required_ms {
                    self.state = SessionState::Complete { target };
                    Some(SessionEvent::Completed(target))
                } else {
                    self.state = SessionState::Charging { target, elapsed_ms };
                    None
                }
            }
        }
    }
}
