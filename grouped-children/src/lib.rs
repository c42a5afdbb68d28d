//! # grouped-children
//!
//! Lets a component accept several named groups of children, declared as
//! nested marker elements, and receive each group as its own ordered list
//! instead of one flat children list.
//!
//! ## How it works
//!
//! 1. A [`GroupSpec`] maps group keys to component types. Keys without a
//!    component get a generated proxy component ([`parse_grouping_spec`]),
//!    flagged as [synthesized](ComponentType::is_synthesized).
//! 2. On every render the children are flattened into one owned list
//!    ([`children_to_array`]).
//! 3. Each group, in spec order, takes its matching children out of that
//!    list ([`splice_children_by_type`]). Children matched under a proxy are
//!    replaced by the proxy's own children.
//! 4. The wrapped component receives the groups under camelCased keys
//!    ([`uncapitalize`]) next to the remaining children.
//!
//! ## Example
//!
//! ```
//! use grouped_children::{
//!     ComponentType, Config, Extracted, GroupSpec, GroupedProps, Node, WithGroupedChildren,
//!     component, markup,
//! };
//!
//! let header = ComponentType::new("Header");
//! let spec = GroupSpec::new()
//!     .group("Header", header.clone())
//!     .proxy("Footer");
//!
//! let card = WithGroupedChildren::new(
//!     &spec,
//!     Config::new(),
//!     component("Card", |props: GroupedProps<()>| {
//!         let footer: Vec<String> = props.groups["footer"]
//!             .iter()
//!             .filter_map(Extracted::as_traversed)
//!             .map(|children| markup(children))
//!             .collect();
//!         (markup(&props.children), footer)
//!     }),
//! )
//! .unwrap();
//!
//! let children = Node::Fragment(vec![
//!     "intro ".into(),
//!     header.element().with_child("Title").into(),
//!     card.element("Footer").with_children(["a", "b"]).into(),
//!     "body".into(),
//! ]);
//! let (rest, footer) = card.render((), children).unwrap();
//! assert_eq!(rest, "intro body");
//! assert_eq!(footer, ["ab"]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod tracing_macros;

mod component;
mod config;
mod error;
mod extract;
mod flatten;
mod grouped;
/// Property names for groups.
pub mod naming;
mod node;
mod spec;

pub use component::*;
pub use config::*;
pub use error::*;
pub use extract::*;
pub use flatten::*;
pub use grouped::*;
pub use naming::uncapitalize;
pub use node::*;
pub use spec::*;
