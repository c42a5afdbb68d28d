//! Flattening nested children into one ordered list.

use crate::error::BoxError;
use crate::node::{Element, Node};
use crate::tracing_macros::trace;

/// Turns the children passed to a component into a flat, owned list.
///
/// The returned vector is consumed by the extraction step, so it must not be
/// shared with anything else.
pub type ChildrenToArray = dyn Fn(Node) -> Result<Vec<Node>, BoxError> + Send + Sync;

/// The default flattener.
///
/// - Fragments are flattened recursively, in order.
/// - `Null` and booleans are dropped.
/// - Text and numbers are kept as they are.
/// - Every element gets a positional key: an explicit key `k` becomes `.$k`,
///   otherwise the index is used (`.0`, `.1`, ...). Positions inside nested
///   fragments are joined with `:`, so the first child of a fragment at
///   index 1 is keyed `.1:0`.
///
/// ```
/// use grouped_children::{Element, Node, children_to_array};
///
/// let children = Node::Fragment(vec![
///     "text".into(),
///     Node::Null,
///     Node::Fragment(vec![Element::new("a").into(), Element::new("b").with_key("x").into()]),
/// ]);
/// let flat = children_to_array(children).unwrap();
/// let keys: Vec<_> = flat.iter().filter_map(|n| n.as_element()?.key.as_deref()).collect();
/// assert_eq!(keys, [".2:0", ".2:$x"]);
/// assert_eq!(flat.len(), 3);
/// ```
pub fn children_to_array(children: Node) -> Result<Vec<Node>, BoxError> {
    let mut flat = Vec::new();
    match children {
        Node::Fragment(nodes) => collect_all(nodes, "", &mut flat),
        single => {
            let name = format!(".{}", position_key(&single, 0));
            collect(single, name, &mut flat);
        }
    }
    trace!(len = flat.len(), "flattened children");
    Ok(flat)
}

fn collect_all(nodes: Vec<Node>, prefix: &str, out: &mut Vec<Node>) {
    let separator = if prefix.is_empty() { "." } else { ":" };
    for (index, node) in nodes.into_iter().enumerate() {
        let name = format!("{prefix}{separator}{}", position_key(&node, index));
        collect(node, name, out);
    }
}

fn collect(node: Node, name: String, out: &mut Vec<Node>) {
    match node {
        Node::Null | Node::Bool(_) => {}
        Node::Fragment(nodes) => collect_all(nodes, &name, out),
        Node::Element(element) => out.push(Node::Element(Element {
            key: Some(name),
            ..element
        })),
        leaf => out.push(leaf),
    }
}

fn position_key(node: &Node, index: usize) -> String {
    match node.as_element().and_then(|e| e.key.as_deref()) {
        Some(key) => format!("${key}"),
        None => index.to_string(),
    }
}
