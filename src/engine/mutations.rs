//! Mutation Log - Records every write the host tree performs.
//!
//! Recording is off by default (see [`crate::config::set_record_mutations`]).
//! When on, each host primitive that changes the tree appends one
//! [`Mutation`] to a thread-local log. Tests use the log to check that a
//! re-render of an unchanged tree issues no structural or text writes.

use std::cell::RefCell;

use bitflags::bitflags;

use super::node::NodeId;
use crate::config;

bitflags! {
    /// Kinds of host tree writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MutationKind: u16 {
        const CREATE_ELEMENT   = 1 << 0;
        const CREATE_TEXT      = 1 << 1;
        const APPEND           = 1 << 2;
        const REMOVE           = 1 << 3;
        const REPLACE          = 1 << 4;
        const SET_ATTRIBUTE    = 1 << 5;
        const REMOVE_ATTRIBUTE = 1 << 6;
        const SET_TEXT         = 1 << 7;

        const CREATE = Self::CREATE_ELEMENT.bits() | Self::CREATE_TEXT.bits();
        const STRUCTURAL = Self::CREATE.bits()
            | Self::APPEND.bits()
            | Self::REMOVE.bits()
            | Self::REPLACE.bits();
    }
}

/// One recorded write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub node: NodeId,
}

thread_local! {
    static MUTATIONS: RefCell<Vec<Mutation>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn record(kind: MutationKind, node: NodeId) {
    if !config::record_mutations() {
        return;
    }
    MUTATIONS.with(|log| log.borrow_mut().push(Mutation { kind, node }));
}

/// Drain the log.
pub fn take_mutations() -> Vec<Mutation> {
    MUTATIONS.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

/// Union of every kind recorded since the last reset.
pub fn mutation_kinds() -> MutationKind {
    MUTATIONS.with(|log| {
        log.borrow()
            .iter()
            .fold(MutationKind::empty(), |acc, m| acc | m.kind)
    })
}

/// Number of recorded writes whose kind intersects `kind`.
pub fn mutation_count(kind: MutationKind) -> usize {
    MUTATIONS.with(|log| log.borrow().iter().filter(|m| m.kind.intersects(kind)).count())
}

/// Clear the log (for testing).
pub fn reset_mutations() {
    MUTATIONS.with(|log| log.borrow_mut().clear());
}
