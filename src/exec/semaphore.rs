use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

struct State {
    permits: usize,
    interrupted: bool,
}

/// Counting semaphore.
///
/// `interrupt` wakes every waiter in `acquire` and makes it (and any later
/// `acquire`) return `false` without taking a permit.
pub struct Semaphore {
    state: Mutex<State>,
    cond: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Semaphore {
            state: Mutex::new(State {
                permits,
                interrupted: false,
            }),
            cond: Condvar::new(),
        }
    }

    pub fn release(&self) {
        self.state.lock().permits += 1;
        self.cond.notify_one();
    }

    /// Take one permit, blocking until one is available. Returns `false` if
    /// the semaphore was interrupted before or while waiting.
    pub fn acquire(&self) -> bool {
        let mut state = self.state.lock();
        loop {
            if state.interrupted {
                return false;
            }
            if state.permits > 0 {
                state.permits -= 1;
                return true;
            }
            self.cond.wait(&mut state);
        }
    }

    /// Take one permit, blocking until one is available even after an
    /// interrupt.
    pub fn acquire_uninterruptible(&self) {
        let mut state = self.state.lock();
        while state.permits == 0 {
            self.cond.wait(&mut state);
        }
        state.permits -= 1;
    }

    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        if state.permits == 0 {
            return false;
        }
        state.permits -= 1;
        true
    }

    /// Like `acquire_uninterruptible`, giving up after `timeout`. Returns
    /// whether a permit was taken.
    pub fn acquire_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.permits == 0 {
            if self.cond.wait_until(&mut state, deadline).timed_out() && state.permits == 0 {
                return false;
            }
        }
        state.permits -= 1;
        true
    }

    /// Fail every current and future `acquire`.
    pub fn interrupt(&self) {
        self.state.lock().interrupted = true;
        self.cond.notify_all();
    }

    pub fn is_interrupted(&self) -> bool {
        self.state.lock().interrupted
    }

    pub fn available(&self) -> usize {
        self.state.lock().permits
    }
}

impl Default for Semaphore {
    fn default() -> Self {
        Self::new(0)
    }
}
