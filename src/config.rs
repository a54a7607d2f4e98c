//! Engine settings.
//!
//! Thread-local switches read by the reconciler. They are plain cells rather
//! than signals: a replay reads them from inside an effect, and that read must
//! not become a dependency.

use std::cell::Cell;

/// How component nodes are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingMode {
    /// Components subscribe to the signals they read and replay on change.
    #[default]
    Reactive,
    /// Components render once; signal reads are not tracked.
    Static,
}

thread_local! {
    static BINDING_MODE: Cell<BindingMode> = const { Cell::new(BindingMode::Reactive) };
    static RECORD_MUTATIONS: Cell<bool> = const { Cell::new(false) };
}

/// Get the current binding mode.
pub fn binding_mode() -> BindingMode {
    BINDING_MODE.with(|m| m.get())
}

/// Set the binding mode. Affects components reconciled from now on.
pub fn set_binding_mode(mode: BindingMode) {
    BINDING_MODE.with(|m| m.set(mode));
}

/// Whether host writes are appended to the mutation log.
pub fn record_mutations() -> bool {
    RECORD_MUTATIONS.with(|r| r.get())
}

pub fn set_record_mutations(enabled: bool) {
    RECORD_MUTATIONS.with(|r| r.set(enabled));
}

/// Restore defaults (for testing).
pub fn reset_config() {
    set_binding_mode(BindingMode::default());
    set_record_mutations(false);
}
