//! Host Engine - The persistent host tree and its bindings.
//!
//! The engine manages the core data structures:
//! - Node: element / text / null-placeholder nodes with identity and weak parent links
//! - Subscription: the component effect owned by the node it renders into
//! - Mutations: thread-local log of host writes
//!
//! # Architecture
//!
//! ```text
//! container <div>                      HostNode (element)
//!   └── <p class="x">                  HostNode (element) ── Subscription (Counter)
//!         └── "Count: 3"               HostNode (text)
//! ```
//!
//! The reconciler in [`crate::pipeline`] is the only writer; everything here
//! is a primitive it composes.

mod mutations;
mod node;
mod subscription;

pub use mutations::*;
pub use node::*;
pub use subscription::*;
