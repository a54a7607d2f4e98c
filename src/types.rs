//! Core types - The element model.
//!
//! A [`VirtualElement`] is an immutable description of what should exist at a
//! position in the host tree. It is built fresh for every render call and
//! dropped once reconciliation finishes.
//!
//! ```text
//! VirtualElement
//!   ├── Null                       → null-placeholder node
//!   ├── Text("hello")              → text node
//!   └── Node(ElementNode)
//!         ├── kind: Tag("div")     → element node
//!         │   kind: Component(f)   → whatever f(props) renders
//!         ├── props: Props         → attributes
//!         └── children: Vec<..>    → matched by position
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_reconcile::{h, Props, VirtualElement};
//!
//! let tree = h(
//!     "div",
//!     Props::new().with("style", "color: red"),
//!     ["Hello".into(), VirtualElement::Null],
//! );
//! ```

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

// =============================================================================
// AttrValue
// =============================================================================

/// A single prop value. Written to the host tree in its `Display` form.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Float(n) => write!(f, "{n}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Insertion-ordered prop mapping.
///
/// Attribute writes happen in insertion order, so two renders of the same
/// props issue the same sequence of writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: IndexMap<String, AttrValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

// =============================================================================
// Component
// =============================================================================

/// A component function: props in, element out.
///
/// Cheap to clone (shared `Rc`). When a component reads signals while
/// rendering, the reconciler subscribes to them and re-renders the component's
/// position when they change.
#[derive(Clone)]
pub struct Component {
    name: Option<Rc<str>>,
    render: Rc<dyn Fn(&Props) -> VirtualElement>,
}

impl Component {
    pub fn new(render: impl Fn(&Props) -> VirtualElement + 'static) -> Self {
        Self {
            name: None,
            render: Rc::new(render),
        }
    }

    /// Same as [`Component::new`] with a name that shows up in logs.
    pub fn named(name: &str, render: impl Fn(&Props) -> VirtualElement + 'static) -> Self {
        Self {
            name: Some(Rc::from(name)),
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the component.
    pub fn render(&self, props: &Props) -> VirtualElement {
        (self.render)(props)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Component({name})"),
            None => f.write_str("Component(<anonymous>)"),
        }
    }
}

// =============================================================================
// ElementType
// =============================================================================

/// What an element node renders: a host tag or a component function.
#[derive(Debug, Clone)]
pub enum ElementType {
    Tag(String),
    Component(Component),
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        ElementType::Tag(tag.to_string())
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::Tag(tag)
    }
}

impl From<Component> for ElementType {
    fn from(component: Component) -> Self {
        ElementType::Component(component)
    }
}

// =============================================================================
// VirtualElement
// =============================================================================

/// Tag or component, with props and positional children.
#[derive(Debug, Clone)]
pub struct ElementNode {
    kind: ElementType,
    props: Props,
    children: Vec<VirtualElement>,
}

impl ElementNode {
    pub fn kind(&self) -> &ElementType {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[VirtualElement] {
        &self.children
    }
}

/// Declarative description of a subtree.
#[derive(Debug, Clone, Default)]
pub enum VirtualElement {
    /// Nothing rendered here. Still occupies its child index.
    #[default]
    Null,
    Text(String),
    Node(ElementNode),
}

impl VirtualElement {
    pub fn text(content: impl Into<String>) -> Self {
        VirtualElement::Text(content.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, VirtualElement::Null)
    }

    pub fn as_node(&self) -> Option<&ElementNode> {
        match self {
            VirtualElement::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<&str> for VirtualElement {
    fn from(content: &str) -> Self {
        VirtualElement::Text(content.to_string())
    }
}

impl From<String> for VirtualElement {
    fn from(content: String) -> Self {
        VirtualElement::Text(content)
    }
}

impl From<ElementNode> for VirtualElement {
    fn from(node: ElementNode) -> Self {
        VirtualElement::Node(node)
    }
}

impl<T: Into<VirtualElement>> From<Option<T>> for VirtualElement {
    fn from(value: Option<T>) -> Self {
        value.map_or(VirtualElement::Null, Into::into)
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Build an element node.
///
/// Pure: performs no validation beyond constructing the variant. Null and
/// text elements are plain values and do not go through here.
pub fn h(
    kind: impl Into<ElementType>,
    props: Props,
    children: impl IntoIterator<Item = VirtualElement>,
) -> VirtualElement {
    VirtualElement::Node(ElementNode {
        kind: kind.into(),
        props,
        children: children.into_iter().collect(),
    })
}

// =============================================================================
// Tests
// =============================================================================
