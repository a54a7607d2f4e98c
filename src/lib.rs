//! # spark-reconcile
//!
//! Declarative UI reconciler with signal-driven component replay.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A render call takes a [`VirtualElement`] tree and converges a host tree to
//! it in place, reusing nodes whose category and tag still match and replacing
//! the rest. Component nodes render inside an effect; when a signal they read
//! changes, only their own position is re-rendered.
//!
//! ```text
//! h(..) → VirtualElement → render → reconcile → HostNode tree
//!                                      │
//!                     Component ── effect ── Subscription (owned by node)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use spark_reconcile::{h, render, Component, HostNode, Props, VirtualElement};
//! use spark_signals::signal;
//!
//! let count = signal(0);
//! let count_read = count.clone();
//! let counter = Component::named("Counter", move |_: &Props| {
//!     VirtualElement::text(format!("Count: {}", count_read.get()))
//! });
//!
//! let root = HostNode::element("div")?;
//! render(&h(counter, Props::new(), []), &root)?;
//! assert_eq!(root.text_content(), "Count: 0");
//!
//! count.set(1); // same text node, new content
//! assert_eq!(root.text_content(), "Count: 1");
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Element model (VirtualElement, Props, Component, `h`)
//! - [`engine`] - Host tree, subscriptions, mutation log
//! - [`pipeline`] - Reconciler, attribute sync, render entry point
//! - [`config`] - Thread-local engine settings
//! - [`error`] - Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{
    binding_mode, record_mutations, reset_config, set_binding_mode, set_record_mutations,
    BindingMode,
};

pub use engine::{
    dispose_subtree, live_subscription_count, mutation_count, mutation_kinds, reset_mutations,
    take_mutations, HostNode, Mutation, MutationKind, NodeCategory, NodeId, Subscription,
    WeakHostNode,
};

pub use error::{HostError, RenderError};

pub use pipeline::{mount, reconcile, render, sync_attributes, unmount, MountHandle};
