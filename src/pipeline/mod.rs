//! Render Pipeline
//!
//! This module turns virtual elements into host tree writes.
//!
//! # Pipeline Architecture
//!
//! ```text
//! render(element, container)
//!   └── reconcile(element, first_child)
//!         ├── Tag       → sync_attributes + positional children
//!         ├── Text/Null → text node / placeholder
//!         └── Component → bind_component (effect → reconcile on every run)
//! ```
//!
//! ## Key Design Principles
//!
//! - **Authoritative return**: every reconcile returns the node now at its position
//! - **Dispose before create**: a position's old subscription is stopped before a new one exists
//! - **Single writer**: only this module mutates the host tree

pub mod attributes;
mod bind;
pub mod mount;
pub mod reconcile;

// Re-exports
pub use attributes::sync_attributes;
pub use mount::{mount, render, unmount, MountHandle};
pub use reconcile::reconcile;
