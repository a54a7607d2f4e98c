//! HostNode - The persistent host tree.
//!
//! A small in-memory document: element nodes (tag, attributes, ordered
//! children), text nodes, and null-placeholders (text nodes with empty
//! content). Handles are reference counted; a parent owns its children and
//! each child keeps a weak link back to its parent.
//!
//! Each node also owns at most one [`Subscription`]. Dropping the node drops
//! the subscription, which stops its effect.
//!
//! # Example
//!
//! ```ignore
//! use spark_reconcile::engine::HostNode;
//!
//! let root = HostNode::element("div")?;
//! let label = HostNode::text("hello");
//! root.append_child(&label)?;
//! root.set_attribute("class", "greeting")?;
//!
//! assert_eq!(root.to_html(), r#"<div class="greeting">hello</div>"#);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use super::mutations::{record, MutationKind};
use super::subscription::Subscription;
use crate::error::HostError;

// =============================================================================
// Node Identity
// =============================================================================

/// Unique id of a host node, stable for the node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

thread_local! {
    /// Counter for generating node ids.
    static NEXT_NODE_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_node_id() -> NodeId {
    NEXT_NODE_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        NodeId(id)
    })
}

/// General category of a node. Reuse across renders requires equal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Element,
    Text,
    /// Text node with empty content: "nothing rendered here".
    Placeholder,
}

// =============================================================================
// Node Storage
// =============================================================================

enum NodeData {
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
    },
    Text(String),
}

struct NodeInner {
    id: NodeId,
    data: RefCell<NodeData>,
    parent: RefCell<Weak<NodeInner>>,
    children: RefCell<Vec<HostNode>>,
    subscription: RefCell<Option<Subscription>>,
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        // Outer binding stops before the bindings of its children
        if let Some(subscription) = self.subscription.get_mut().take() {
            subscription.dispose();
        }
    }
}

/// Shared handle to a host node. Equality is identity.
#[derive(Clone)]
pub struct HostNode {
    inner: Rc<NodeInner>,
}

/// Non-owning handle; does not keep the node alive.
#[derive(Clone, Default)]
pub struct WeakHostNode {
    inner: Weak<NodeInner>,
}

impl WeakHostNode {
    pub fn upgrade(&self) -> Option<HostNode> {
        self.inner.upgrade().map(|inner| HostNode { inner })
    }
}

// =============================================================================
// Name Validation
// =============================================================================

fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '='))
}

// =============================================================================
// Construction
// =============================================================================

impl HostNode {
    fn new(data: NodeData) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                id: next_node_id(),
                data: RefCell::new(data),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
                subscription: RefCell::new(None),
            }),
        }
    }

    /// Create an element node. Fails on names the host cannot represent.
    pub fn element(tag: &str) -> Result<Self, HostError> {
        if !is_valid_tag_name(tag) {
            return Err(HostError::InvalidTagName { tag: tag.to_string() });
        }
        let node = Self::new(NodeData::Element {
            tag: tag.to_string(),
            attributes: IndexMap::new(),
        });
        record(MutationKind::CREATE_ELEMENT, node.id());
        Ok(node)
    }

    /// Create a text node.
    pub fn text(content: &str) -> Self {
        let node = Self::new(NodeData::Text(content.to_string()));
        record(MutationKind::CREATE_TEXT, node.id());
        node
    }

    /// Create a null-placeholder (empty text node).
    pub fn placeholder() -> Self {
        Self::text("")
    }

    pub fn downgrade(&self) -> WeakHostNode {
        WeakHostNode {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &HostNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for HostNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for HostNode {}

// =============================================================================
// Node Properties
// =============================================================================

impl HostNode {
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    pub fn category(&self) -> NodeCategory {
        match &*self.inner.data.borrow() {
            NodeData::Element { .. } => NodeCategory::Element,
            NodeData::Text(content) if content.is_empty() => NodeCategory::Placeholder,
            NodeData::Text(_) => NodeCategory::Text,
        }
    }

    pub fn is_element(&self) -> bool {
        self.category() == NodeCategory::Element
    }

    /// Text-category check; a null-placeholder is a text node too.
    pub fn is_text(&self) -> bool {
        matches!(&*self.inner.data.borrow(), NodeData::Text(_))
    }

    pub fn is_placeholder(&self) -> bool {
        self.category() == NodeCategory::Placeholder
    }

    /// Tag name as created, for element nodes.
    pub fn tag_name(&self) -> Option<String> {
        match &*self.inner.data.borrow() {
            NodeData::Element { tag, .. } => Some(tag.clone()),
            NodeData::Text(_) => None,
        }
    }

    /// Case-insensitive tag comparison. False for non-elements.
    pub fn has_tag(&self, tag: &str) -> bool {
        match &*self.inner.data.borrow() {
            NodeData::Element { tag: own, .. } => own.eq_ignore_ascii_case(tag),
            NodeData::Text(_) => false,
        }
    }

    /// Own content of a text node.
    pub fn text_value(&self) -> Option<String> {
        match &*self.inner.data.borrow() {
            NodeData::Text(content) => Some(content.clone()),
            NodeData::Element { .. } => None,
        }
    }

    /// Overwrite the content of a text node.
    pub fn set_text(&self, content: &str) -> Result<(), HostError> {
        match &mut *self.inner.data.borrow_mut() {
            NodeData::Text(own) => {
                own.clear();
                own.push_str(content);
            }
            NodeData::Element { .. } => {
                return Err(HostError::NotText { node: self.id() });
            }
        }
        record(MutationKind::SET_TEXT, self.id());
        Ok(())
    }
}

// =============================================================================
// Attributes
// =============================================================================

impl HostNode {
    /// All attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        match &*self.inner.data.borrow() {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            NodeData::Text(_) => Vec::new(),
        }
    }

    pub fn attribute_names(&self) -> Result<Vec<String>, HostError> {
        match &*self.inner.data.borrow() {
            NodeData::Element { attributes, .. } => Ok(attributes.keys().cloned().collect()),
            NodeData::Text(_) => Err(HostError::NotAnElement { node: self.id() }),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &*self.inner.data.borrow() {
            NodeData::Element { attributes, .. } => attributes.get(name).cloned(),
            NodeData::Text(_) => None,
        }
    }

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        if !is_valid_attribute_name(name) {
            return Err(HostError::InvalidAttributeName { name: name.to_string() });
        }
        match &mut *self.inner.data.borrow_mut() {
            NodeData::Element { attributes, .. } => {
                attributes.insert(name.to_string(), value.to_string());
            }
            NodeData::Text(_) => return Err(HostError::NotAnElement { node: self.id() }),
        }
        record(MutationKind::SET_ATTRIBUTE, self.id());
        Ok(())
    }

    /// Returns whether the attribute was present.
    pub fn remove_attribute(&self, name: &str) -> Result<bool, HostError> {
        let removed = match &mut *self.inner.data.borrow_mut() {
            NodeData::Element { attributes, .. } => attributes.shift_remove(name).is_some(),
            NodeData::Text(_) => return Err(HostError::NotAnElement { node: self.id() }),
        };
        if removed {
            record(MutationKind::REMOVE_ATTRIBUTE, self.id());
        }
        Ok(removed)
    }
}

// =============================================================================
// Tree Structure
// =============================================================================

impl HostNode {
    pub fn parent(&self) -> Option<HostNode> {
        self.inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| HostNode { inner })
    }

    /// Snapshot of the child list.
    pub fn children(&self) -> Vec<HostNode> {
        self.inner.children.borrow().clone()
    }

    pub fn child(&self, index: usize) -> Option<HostNode> {
        self.inner.children.borrow().get(index).cloned()
    }

    pub fn first_child(&self) -> Option<HostNode> {
        self.child(0)
    }

    pub fn child_count(&self) -> usize {
        self.inner.children.borrow().len()
    }

    /// Position of this node among its parent's children.
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let children = parent.inner.children.borrow();
        children.iter().position(|c| c.ptr_eq(self))
    }

    /// Append `child` as the last child, detaching it from any previous parent.
    pub fn append_child(&self, child: &HostNode) -> Result<(), HostError> {
        if !self.is_element() {
            return Err(HostError::NotAnElement { node: self.id() });
        }
        child.detach();
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.children.borrow_mut().push(child.clone());
        record(MutationKind::APPEND, child.id());
        Ok(())
    }

    pub fn remove_child(&self, child: &HostNode) -> Result<(), HostError> {
        let position = self
            .inner
            .children
            .borrow()
            .iter()
            .position(|c| c.ptr_eq(child));
        let Some(position) = position else {
            return Err(HostError::NotAChild {
                parent: self.id(),
                child: child.id(),
            });
        };
        let removed = self.inner.children.borrow_mut().remove(position);
        *removed.inner.parent.borrow_mut() = Weak::new();
        record(MutationKind::REMOVE, removed.id());
        Ok(())
    }

    /// Swap this node for `replacement` at the same index of the same parent.
    ///
    /// Sibling indices never shift: the slot is overwritten, not removed and
    /// re-inserted.
    pub fn replace_with(&self, replacement: &HostNode) -> Result<(), HostError> {
        if self.ptr_eq(replacement) {
            return Ok(());
        }
        let parent = self.parent().ok_or(HostError::Detached { node: self.id() })?;
        replacement.detach();
        let position = self
            .index_in_parent()
            .ok_or(HostError::Detached { node: self.id() })?;

        *replacement.inner.parent.borrow_mut() = Rc::downgrade(&parent.inner);
        let old = std::mem::replace(
            &mut parent.inner.children.borrow_mut()[position],
            replacement.clone(),
        );
        *old.inner.parent.borrow_mut() = Weak::new();
        record(MutationKind::REPLACE, replacement.id());
        Ok(())
    }

    /// Unlink from the current parent, if any. No-op when detached.
    fn detach(&self) {
        if let Some(parent) = self.parent() {
            let _ = parent.remove_child(self);
        }
    }
}

// =============================================================================
// Subscription Slot
// =============================================================================

impl HostNode {
    /// Whether a live subscription is attached.
    pub fn has_subscription(&self) -> bool {
        self.inner
            .subscription
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_live)
    }

    /// Attach `subscription`, handing back whatever was attached before.
    pub(crate) fn set_subscription(&self, subscription: Subscription) -> Option<Subscription> {
        self.inner.subscription.borrow_mut().replace(subscription)
    }

    pub(crate) fn take_subscription(&self) -> Option<Subscription> {
        self.inner.subscription.borrow_mut().take()
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl HostNode {
    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeData::Text(content) = &*self.inner.data.borrow() {
            out.push_str(content);
            return;
        }
        for child in self.inner.children.borrow().iter() {
            child.collect_text(out);
        }
    }

    /// HTML-like serialization, mainly for tests and logs.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match &*self.inner.data.borrow() {
            NodeData::Text(content) => out.push_str(&escape(content, false)),
            NodeData::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value, true));
                    out.push('"');
                }
                out.push('>');
                for child in self.inner.children.borrow().iter() {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape(raw: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Debug for HostNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner.data.borrow() {
            NodeData::Element { tag, .. } => write!(f, "<{tag}>{}", self.id()),
            NodeData::Text(content) if content.is_empty() => write!(f, "<placeholder>{}", self.id()),
            NodeData::Text(content) => write!(f, "{content:?}{}", self.id()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
