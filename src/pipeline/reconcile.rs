//! Reconciler - Converge a mount point to a virtual element.
//!
//! `reconcile` looks at the node currently occupying a position and the
//! element that should be there, then reuses, mutates or replaces the node.
//! It always returns the node that now occupies the position; callers must use
//! that handle, never the mount point they passed in.
//!
//! # Reuse Rules
//!
//! | Element        | Reused when mount point is             |
//! |----------------|----------------------------------------|
//! | `Null`         | a null-placeholder                     |
//! | `Text`         | any text node (placeholders included)  |
//! | `Tag(t)`       | an element whose tag equals `t`, any case |
//! | `Component(f)` | whatever `f` renders decides           |
//!
//! Nothing else is compared. Children are matched by index only: a reordered
//! list is reconciled as in-place edits.
//!
//! # Replacement
//!
//! An incompatible node is swapped for the new one in its parent's child list
//! (same index). Every subscription in the old subtree is disposed before the
//! swap.

use tracing::debug;

use super::attributes::sync_attributes;
use super::bind::bind_component;
use crate::engine::{dispose_subtree, HostNode};
use crate::error::{RenderError, Result};
use crate::types::{ElementNode, ElementType, VirtualElement};

/// Reconcile `element` against `mount_point` under `parent`.
///
/// `mount_point` is the node at this position, or `None` for a fresh slot
/// (the caller appends the returned node). `clear_own_subscription` disposes
/// the mount point's subscription before its content is re-derived; it is
/// false only for a subscription's own replay.
pub fn reconcile(
    element: &VirtualElement,
    mount_point: Option<HostNode>,
    parent: &HostNode,
    clear_own_subscription: bool,
) -> Result<HostNode> {
    if clear_own_subscription {
        if let Some(subscription) = mount_point.as_ref().and_then(HostNode::take_subscription) {
            subscription.dispose();
        }
    }

    match element {
        VirtualElement::Null => reconcile_null(mount_point),
        VirtualElement::Text(content) => reconcile_text(content, mount_point),
        VirtualElement::Node(node) => match node.kind() {
            ElementType::Tag(tag) => reconcile_tag(tag, node, mount_point),
            ElementType::Component(component) => {
                bind_component(component, node.props(), mount_point, parent)
            }
        },
    }
}

fn reconcile_null(mount_point: Option<HostNode>) -> Result<HostNode> {
    match mount_point {
        Some(node) if node.is_placeholder() => Ok(node),
        Some(old) => {
            let placeholder = HostNode::placeholder();
            replace_in_place(&old, &placeholder)?;
            Ok(placeholder)
        }
        None => Ok(HostNode::placeholder()),
    }
}

fn reconcile_text(content: &str, mount_point: Option<HostNode>) -> Result<HostNode> {
    let node = match mount_point {
        Some(node) if node.is_text() => node,
        Some(old) => {
            let node = HostNode::text(content);
            replace_in_place(&old, &node)?;
            return Ok(node);
        }
        None => {
            let node = HostNode::text(content);
            debug!(node = %node.id(), "created text node");
            return Ok(node);
        }
    };

    if node.text_value().as_deref() != Some(content) {
        debug!(
            node = %node.id(),
            from = %node.text_value().unwrap_or_default(),
            to = content,
            "changing text"
        );
        node.set_text(content)?;
    }
    Ok(node)
}

fn reconcile_tag(tag: &str, element: &ElementNode, mount_point: Option<HostNode>) -> Result<HostNode> {
    if tag.trim().is_empty() {
        return Err(RenderError::MalformedElement {
            reason: "element tag is empty".to_string(),
        });
    }

    let node = match mount_point {
        Some(node) if node.has_tag(tag) => node,
        Some(old) => {
            let node = HostNode::element(tag)?;
            replace_in_place(&old, &node)?;
            node
        }
        None => {
            let node = HostNode::element(tag)?;
            debug!(node = %node.id(), tag, "created element");
            node
        }
    };

    sync_attributes(&node, Some(element.props()))?;
    reconcile_children(&node, element.children())?;
    Ok(node)
}

/// Positional child reconciliation.
fn reconcile_children(parent: &HostNode, children: &[VirtualElement]) -> Result<()> {
    let existing = parent.children();
    let common = existing.len().min(children.len());

    for (child, node) in children.iter().zip(existing.iter()) {
        reconcile(child, Some(node.clone()), parent, true)?;
    }

    for stale in &existing[common..] {
        debug!(parent = %parent.id(), node = %stale.id(), "removing child");
        dispose_subtree(stale);
        parent.remove_child(stale)?;
    }

    for child in &children[common..] {
        let node = reconcile(child, None, parent, true)?;
        debug!(parent = %parent.id(), node = %node.id(), "appending child");
        parent.append_child(&node)?;
    }

    Ok(())
}

/// Swap `old` for `new` at the same index, releasing `old`'s subscriptions.
///
/// A detached `old` has no slot to swap into; the caller's return value
/// carries `new` instead.
pub(crate) fn replace_in_place(old: &HostNode, new: &HostNode) -> Result<()> {
    debug!(old = ?old, new = ?new, "replacing node");
    dispose_subtree(old);
    if old.parent().is_some() {
        old.replace_with(new)?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
