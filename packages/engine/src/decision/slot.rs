//! Single-assignment slot that arbitrates first-responder races.

use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug)]
enum SlotState<T> {
    Open,
    Committed(T),
    Closed,
}

/// One decision window's landing zone.
///
/// Many responders may race to commit; exactly one wins and every later
/// attempt is refused. The waiting side observes the committed value once.
/// Winner selection happens under a single lock, so "first" is well defined
/// even when commits arrive on different threads in the same instant.
#[derive(Debug)]
pub struct DecisionSlot<T> {
    state: Mutex<SlotState<T>>,
    notify: Notify,
}

impl<T> DecisionSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Open),
            notify: Notify::new(),
        }
    }

    /// Try to win the window. Returns `false` when someone already has, or
    /// the window is closed.
    pub fn try_commit(&self, value: T) -> bool {
        let mut state = self.state.lock();
        match *state {
            SlotState::Open => {
                *state = SlotState::Committed(value);
                drop(state);
                self.notify.notify_one();
                true
            }
            _ => false,
        }
    }

    /// Refuse all future commits without producing a value.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if matches!(*state, SlotState::Open) {
            *state = SlotState::Closed;
            drop(state);
            self.notify.notify_one();
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(*self.state.lock(), SlotState::Open)
    }

    /// Wait for the winning value. `None` means the slot was closed first.
    /// Taking the value closes the slot.
    pub async fn wait(&self) -> Option<T> {
        loop {
            {
                let mut state = self.state.lock();
                match std::mem::replace(&mut *state, SlotState::Closed) {
                    SlotState::Committed(value) => return Some(value),
                    SlotState::Closed => return None,
                    SlotState::Open => *state = SlotState::Open,
                }
            }
            self.notify.notified().await;
        }
    }
}

impl<T> Default for DecisionSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
