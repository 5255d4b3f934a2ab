// ============================================================================
// REQUEST GUARD - In-flight tokens + session generations
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

/// At most one holder per action at a time.
#[derive(Default)]
pub struct InFlight {
    busy: Rc<Cell<bool>>,
}

/// Released on drop, including early returns.
pub struct InFlightToken {
    busy: Rc<Cell<bool>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<InFlightToken> {
        if self.busy.replace(true) {
            return None;
        }
        Some(InFlightToken {
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

/// Bumped on logout, expiry and dispose. A response captured under an
/// older generation must not touch state.
#[derive(Default)]
pub struct SessionGeneration {
    current: Cell<u64>,
}

impl SessionGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current.get()
    }

    pub fn advance(&self) -> u64 {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current.get() == generation
    }
}
