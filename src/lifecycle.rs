// lifecycle.rs - Mount bookkeeping for the browser frame loop
//
// Tracks which window listeners are attached, the pending animation-frame
// id and whether the loop may reschedule itself. web.rs owns the actual
// closures; this only decides what has to be torn down.

use std::cell::{Cell, RefCell};

/// What `stop` hands back for the caller to undo on the window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Teardown {
    pub listeners: Vec<&'static str>,
    pub cancel_frame: Option<i32>,
}

#[derive(Debug)]
pub struct Lifecycle {
    running: Cell<bool>,
    pending: Cell<Option<i32>>,
    listeners: RefCell<Vec<&'static str>>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self { running: Cell::new(true), pending: Cell::new(None), listeners: RefCell::new(Vec::new()) }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Record a listener that was successfully added.
    pub fn listening(&self, event: &'static str) {
        self.listeners.borrow_mut().push(event);
    }

    pub fn scheduled(&self, id: i32) {
        self.pending.set(Some(id));
    }

    /// Called when a scheduled frame fires or scheduling failed. Returns
    /// whether the frame should run.
    pub fn fired(&self) -> bool {
        self.pending.set(None);
        self.running.get()
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending.get()
    }

    /// Stop the loop. The first call returns everything still attached;
    /// later calls return an empty teardown.
    pub fn stop(&self) -> Teardown {
        self.running.set(false);
        Teardown {
            listeners: std::mem::take(&mut *self.listeners.borrow_mut()),
            cancel_frame: self.pending.take(),
        }
    }
}
