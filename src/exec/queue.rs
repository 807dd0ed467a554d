use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// Blocking FIFO.
///
/// `dequeue` parks until an item is available or the queue is signaled. Once
/// signaled, every current and future `dequeue` returns `None`.
pub struct BlockingQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
}

struct QueueState<T> {
    items: VecDeque<T>,
    signaled: bool,
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        BlockingQueue {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                signaled: false,
            }),
            available: Condvar::new(),
        }
    }

    pub fn enqueue(&self, item: T) {
        self.state.lock().items.push_back(item);
        self.available.notify_one();
    }

    pub fn dequeue(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if state.signaled {
                return None;
            }
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            self.available.wait(&mut state);
        }
    }

    pub fn try_dequeue(&self) -> Option<T> {
        let mut state = self.state.lock();
        if state.signaled {
            return None;
        }
        state.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wake every waiter and make all dequeues return `None`.
    pub fn signal(&self) {
        self.state.lock().signaled = true;
        self.available.notify_all();
    }

    pub fn is_signaled(&self) -> bool {
        self.state.lock().signaled
    }

    /// Drop every queued item. Returns how many were dropped.
    pub fn clear(&self) -> usize {
        let drained: Vec<T> = self.state.lock().items.drain(..).collect();
        drained.len()
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
