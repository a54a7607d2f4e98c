//! Mount API - Rendering into a container.
//!
//! [`render`] is the entry point: it reconciles an element against the
//! container's first child, or builds a fresh node and appends it when the
//! container is empty. Calling it again with an unchanged tree changes nothing.
//!
//! # Example
//!
//! ```ignore
//! use spark_reconcile::{h, render, unmount, HostNode, Props};
//!
//! let root = HostNode::element("div")?;
//! render(&h("p", Props::new(), ["Hello".into()]), &root)?;
//! render(&h("p", Props::new(), ["Hello again".into()]), &root)?; // same <p>
//!
//! unmount(&root)?;
//! ```

use tracing::{debug, warn};

use super::reconcile::reconcile;
use crate::engine::{dispose_subtree, HostNode};
use crate::error::{HostError, Result};
use crate::types::VirtualElement;

// =============================================================================
// Render
// =============================================================================

/// Render `element` into `container`.
///
/// Returns the node now at the container's first position.
pub fn render(element: &VirtualElement, container: &HostNode) -> Result<HostNode> {
    if !container.is_element() {
        return Err(HostError::NotAnElement { node: container.id() }.into());
    }

    debug!(container = %container.id(), "starting render");

    match container.first_child() {
        Some(first) => reconcile(element, Some(first), container, true),
        None => {
            let node = reconcile(element, None, container, true)?;
            container.append_child(&node)?;
            Ok(node)
        }
    }
}

/// Dispose every subscription under `container` and remove its children.
pub fn unmount(container: &HostNode) -> Result<()> {
    for child in container.children() {
        dispose_subtree(&child);
        container.remove_child(&child)?;
    }
    debug!(container = %container.id(), "unmounted");
    Ok(())
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Unmounts the container when dropped.
pub struct MountHandle {
    container: Option<HostNode>,
}

impl MountHandle {
    pub fn container(&self) -> Option<&HostNode> {
        self.container.as_ref()
    }

    /// Render a new tree into the same container.
    pub fn update(&self, element: &VirtualElement) -> Result<Option<HostNode>> {
        match &self.container {
            Some(container) => render(element, container).map(Some),
            None => Ok(None),
        }
    }

    /// Dispose bindings and clear the container.
    pub fn unmount(mut self) -> Result<()> {
        match self.container.take() {
            Some(container) => unmount(&container),
            None => Ok(()),
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Some(container) = self.container.take() {
            if let Err(err) = unmount(&container) {
                warn!(container = %container.id(), error = %err, "unmount on drop failed");
            }
        }
    }
}

/// Render `element` into `container` and tie the container's contents to the
/// returned handle.
pub fn mount(element: &VirtualElement, container: &HostNode) -> Result<MountHandle> {
    render(element, container)?;
    Ok(MountHandle {
        container: Some(container.clone()),
    })
}

// =============================================================================
// Tests
// =============================================================================
