//! Child nodes: the values a component receives as children.
//!
//! A [`Node`] is either a leaf (text, number, boolean, null), an
//! [`Element`] with a type and props, or a fragment holding a nested list of
//! nodes. Fragments and the "renders nothing" leaves only exist before
//! flattening; see [`children_to_array`](crate::children_to_array).

use std::fmt;

use indexmap::IndexMap;

use crate::component::ComponentType;

/// A child node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Renders nothing.
    Null,
    /// Renders nothing; kept so custom flatteners can observe it.
    Bool(bool),
    /// A numeric leaf.
    Number(f64),
    /// A text leaf.
    Text(String),
    /// An element with a type, an optional key and props.
    Element(Element),
    /// A nested list of nodes.
    Fragment(Vec<Node>),
}

impl Node {
    /// Returns `Some(&Element)` if this is an element.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the element if this is one.
    pub fn into_element(self) -> Option<Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `Some(&str)` if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns `true` for leaves that render nothing (`Null` and booleans).
    pub fn is_empty_leaf(&self) -> bool {
        matches!(self, Node::Null | Node::Bool(_))
    }

    /// Render as JSX-like markup.
    pub fn to_markup(&self) -> String {
        self.to_string()
    }

    fn write_markup(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            Node::Null | Node::Bool(_) => Ok(()),
            Node::Number(n) => write!(out, "{n}"),
            Node::Text(t) => write_escaped(out, t),
            Node::Element(e) => e.write_markup(out),
            Node::Fragment(nodes) => nodes.iter().try_for_each(|n| n.write_markup(out)),
        }
    }
}

/// Render a sequence of nodes as JSX-like markup.
pub fn markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        // Writing to a String never fails.
        let _ = node.write_markup(&mut out);
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_markup(f)
    }
}

/// The type of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A host tag such as `div`.
    Intrinsic(String),
    /// A component.
    Component(ComponentType),
}

impl ElementType {
    /// Returns the component type, if this is not an intrinsic tag.
    pub fn as_component(&self) -> Option<&ComponentType> {
        match self {
            ElementType::Component(c) => Some(c),
            ElementType::Intrinsic(_) => None,
        }
    }

    /// Tag or component display name.
    pub fn name(&self) -> &str {
        match self {
            ElementType::Intrinsic(tag) => tag,
            ElementType::Component(c) => c.name(),
        }
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        ElementType::Intrinsic(tag.to_owned())
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::Intrinsic(tag)
    }
}

impl From<ComponentType> for ElementType {
    fn from(c: ComponentType) -> Self {
        ElementType::Component(c)
    }
}

impl From<&ComponentType> for ElementType {
    fn from(c: &ComponentType) -> Self {
        ElementType::Component(c.clone())
    }
}

/// Properties of an element: named attributes plus nested children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    /// Attributes, in insertion order.
    pub attrs: IndexMap<String, String>,
    /// Nested children, as given (not flattened).
    pub children: Vec<Node>,
}

/// An element: a typed node with an optional key and props.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// What this element is.
    pub ty: ElementType,
    /// Reconciliation key. The default flattener fills this in.
    pub key: Option<String>,
    /// Attributes and children.
    pub props: Props,
}

impl Element {
    /// Create a new element with no key and empty props.
    pub fn new(ty: impl Into<ElementType>) -> Self {
        Self {
            ty: ty.into(),
            key: None,
            props: Props::default(),
        }
    }

    /// Set the key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.attrs.insert(name.into(), value.into());
        self
    }

    /// Add a child.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.props.children.push(child.into());
        self
    }

    /// Add several children.
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.props.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.props.attrs.get(name).map(|s| s.as_str())
    }

    /// The element's own children.
    pub fn children(&self) -> &[Node] {
        &self.props.children
    }

    /// Whether this element is of the given component type.
    pub fn is_component(&self, ty: &ComponentType) -> bool {
        self.ty.as_component() == Some(ty)
    }

    fn write_markup(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let name = self.ty.name();
        write!(out, "<{name}")?;
        if let Some(key) = &self.key {
            out.write_str(" key=\"")?;
            write_escaped(out, key)?;
            out.write_char('"')?;
        }
        for (k, v) in &self.props.attrs {
            write!(out, " {k}=\"")?;
            write_escaped(out, v)?;
            out.write_char('"')?;
        }
        if self.props.children.is_empty() {
            return out.write_str(" />");
        }
        out.write_char('>')?;
        for child in &self.props.children {
            child.write_markup(out)?;
        }
        write!(out, "</{name}>")
    }
}

fn write_escaped(out: &mut impl fmt::Write, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_owned())
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Number(f64::from(n))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(node: Option<T>) -> Self {
        node.map_or(Node::Null, Into::into)
    }
}
