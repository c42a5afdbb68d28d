//! Extraction of grouped children.
//!
//! Given a flat list of children and a [`NormalizedSpec`], every group takes
//! the children matching its component type out of the list, in spec order.
//! What is left over is the remainder.
//!
//! ## Guarantees
//!
//! - Every child ends up in exactly one place: one group or the remainder.
//! - Relative order is kept within each group and within the remainder.
//! - Groups are drained in declaration order. If two keys share a component
//!   type (or the matcher is not exclusive), the first key takes every match.
//! - Children matched under a synthesized component are passed through the
//!   traversal; a traversal returning `None` drops that child from the group.

use std::ops::Index;

use indexmap::IndexMap;

use crate::component::ComponentType;
use crate::config::Config;
use crate::error::{BoxError, GroupingError};
use crate::naming::uncapitalize;
use crate::node::Node;
use crate::spec::NormalizedSpec;
use crate::tracing_macros::{debug, trace};

/// Decides whether `child` belongs to the group `key` with component `ty`.
pub type ChildMatcher<'a> =
    dyn Fn(&Node, &str, &ComponentType) -> Result<bool, BoxError> + Send + Sync + 'a;

/// Maps a child matched under a synthesized component to the value stored in
/// its group. `None` drops the child.
pub type TraverseChildren<'a, T> =
    dyn Fn(Node) -> Result<Option<T>, BoxError> + Send + Sync + 'a;

/// Matches elements whose type is exactly `ty`.
pub fn default_component_matcher(
    child: &Node,
    _key: &str,
    ty: &ComponentType,
) -> Result<bool, BoxError> {
    Ok(child.as_element().is_some_and(|e| e.is_component(ty)))
}

/// Yields the element's own children, or `None` if the child is not an
/// element or its children are empty.
///
/// Children count as empty when every one of them renders nothing (`Null`,
/// booleans), or when the only child is an empty text or a zero.
pub fn default_traverse_children(child: Node) -> Result<Option<Vec<Node>>, BoxError> {
    Ok(child
        .into_element()
        .map(|e| e.props.children)
        .filter(|children| !is_empty_children(children)))
}

fn is_empty_children(children: &[Node]) -> bool {
    match children {
        [Node::Text(t)] => t.is_empty(),
        [Node::Number(n)] => *n == 0.0 || n.is_nan(),
        _ => children.iter().all(Node::is_empty_leaf),
    }
}

/// One entry of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    /// A matched child, as it was.
    Child(Node),
    /// What the traversal produced for a child matched under a synthesized
    /// component.
    Traversed(T),
}

impl<T> Extracted<T> {
    /// Returns the child if it was kept as is.
    pub fn as_child(&self) -> Option<&Node> {
        match self {
            Extracted::Child(node) => Some(node),
            Extracted::Traversed(_) => None,
        }
    }

    /// Returns the traversal output, if any.
    pub fn as_traversed(&self) -> Option<&T> {
        match self {
            Extracted::Traversed(t) => Some(t),
            Extracted::Child(_) => None,
        }
    }

    /// Consumes the entry, returning the traversal output, if any.
    pub fn into_traversed(self) -> Option<T> {
        match self {
            Extracted::Traversed(t) => Some(t),
            Extracted::Child(_) => None,
        }
    }
}

/// Grouped children, keyed by camelCased group key, in spec order.
///
/// Every spec key is present, possibly with an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedChildren<T = Vec<Node>> {
    groups: IndexMap<String, Vec<Extracted<T>>>,
}

impl<T> GroupedChildren<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: IndexMap::with_capacity(capacity),
        }
    }

    /// Entries of a group, by camelCased key (`"footer"` for `Footer`).
    pub fn get(&self, key: &str) -> Option<&[Extracted<T>]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Take a group out, keeping the order of the others.
    pub fn take(&mut self, key: &str) -> Option<Vec<Extracted<T>>> {
        self.groups.shift_remove(key)
    }

    /// Iterate keys in spec order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate groups in spec order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Extracted<T>])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl<T> Index<&str> for GroupedChildren<T> {
    type Output = [Extracted<T>];

    /// # Panics
    ///
    /// Panics if `key` is not a group.
    fn index(&self, key: &str) -> &[Extracted<T>] {
        match self.groups.get(key) {
            Some(entries) => entries,
            None => panic!("no group `{key}`"),
        }
    }
}

impl<T> IntoIterator for GroupedChildren<T> {
    type Item = (String, Vec<Extracted<T>>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Extracted<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Result of [`extract_children`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedChildren<T = Vec<Node>> {
    /// One entry per spec key.
    pub groups: GroupedChildren<T>,
    /// Children no group matched, in their original order.
    pub rest: Vec<Node>,
}

/// Remove every child matching `ty` from `children` and return them.
///
/// Matched children are removed in order and the others keep their relative
/// order. If `traverse` is given, each matched child is replaced by its
/// output, and children for which it returns `None` are dropped.
///
/// If the matcher fails, `children` is left untouched. If the traversal
/// fails, the matched children have already been removed.
pub fn splice_children_by_type<T>(
    children: &mut Vec<Node>,
    key: &str,
    ty: &ComponentType,
    matcher: &ChildMatcher<'_>,
    traverse: Option<&TraverseChildren<'_, T>>,
) -> Result<Vec<Extracted<T>>, GroupingError> {
    let mut hits = Vec::new();
    for (pos, child) in children.iter().enumerate() {
        let matched = matcher(child, key, ty).map_err(|source| GroupingError::Matcher {
            group: key.to_owned(),
            source,
        })?;
        if matched {
            hits.push(pos);
        }
    }
    if hits.is_empty() {
        return Ok(Vec::new());
    }

    let mut matched = Vec::with_capacity(hits.len());
    let mut kept = Vec::with_capacity(children.len() - hits.len());
    let mut hits = hits.into_iter().peekable();
    for (pos, child) in std::mem::take(children).into_iter().enumerate() {
        if hits.next_if_eq(&pos).is_some() {
            matched.push(child);
        } else {
            kept.push(child);
        }
    }
    *children = kept;

    let Some(traverse) = traverse else {
        return Ok(matched.into_iter().map(Extracted::Child).collect());
    };
    let mut located = Vec::with_capacity(matched.len());
    for child in matched {
        let traversed = traverse(child).map_err(|source| GroupingError::Traverse {
            group: key.to_owned(),
            source,
        })?;
        if let Some(value) = traversed {
            located.push(Extracted::Traversed(value));
        }
    }
    Ok(located)
}

/// Partition a flat list of children by group.
///
/// Groups are processed in spec order; each removes its matches from
/// `children`, which ends up holding the remainder. The traversal is only
/// applied under synthesized component types.
pub fn partition<T>(
    children: &mut Vec<Node>,
    spec: &NormalizedSpec,
    matcher: &ChildMatcher<'_>,
    traverse: Option<&TraverseChildren<'_, T>>,
) -> Result<GroupedChildren<T>, GroupingError> {
    let mut grouped = GroupedChildren::with_capacity(spec.len());
    for (key, ty) in spec.iter() {
        let traverse = if ty.is_synthesized() { traverse } else { None };
        let located = splice_children_by_type(children, key, ty, matcher, traverse)?;
        trace!(group = key, located = located.len(), "extracted group");
        grouped
            .groups
            .insert(uncapitalize(key).into_owned(), located);
    }
    Ok(grouped)
}

/// Flatten `children` and partition them according to `spec`, using the
/// flattener, matcher and traversal from `config`.
pub fn extract_children<T>(
    children: Node,
    spec: &NormalizedSpec,
    config: &Config<T>,
) -> Result<ExtractedChildren<T>, GroupingError> {
    let mut rest = (config.children_to_array_fn())(children)
        .map_err(|source| GroupingError::Flatten { source })?;
    let groups = partition(
        &mut rest,
        spec,
        config.component_matcher_fn(),
        Some(config.traverse_children_fn()),
    )?;
    debug!(
        grouped = groups.entry_count(),
        rest = rest.len(),
        "extracted children"
    );
    Ok(ExtractedChildren { groups, rest })
}
