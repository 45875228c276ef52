//! Test utilities and fixtures for Sylva development.
//!
//! Provides a [`HookLog`] recorder for asserting hook firing order and
//! a [`fixtures`] module with a shared kind registry and pre-built
//! trees used across the workspace's test suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use sylva_tree::UpdateHook;

/// Records hook firings in order, for asserting traversal behavior.
///
/// Create one log, mint tagged hooks from it with
/// [`hook`](HookLog::hook), and compare [`entries`](HookLog::entries)
/// against the expected firing sequence.
#[derive(Clone, Default)]
pub struct HookLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook that appends `tag` to the log every time it fires.
    pub fn hook(&self, tag: &str) -> UpdateHook {
        let entries = Rc::clone(&self.entries);
        let tag = tag.to_owned();
        Box::new(move |_tree, _id, _ctx| entries.borrow_mut().push(tag.clone()))
    }

    /// Everything recorded so far, in firing order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Number of firings recorded so far.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
