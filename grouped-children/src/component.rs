//! Component types: the identities used to recognize grouped children.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::node::Element;

/// Process-unique identity of a [`ComponentType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A component type, used as the marker that identifies which group a child
/// element belongs to.
///
/// Cloning is cheap and clones share the same identity. Equality and hashing
/// go by identity only: two components created separately are never equal,
/// even if they carry the same display name.
///
/// A component type also records whether it was synthesized by
/// [`parse_grouping_spec`](crate::parse_grouping_spec) for a spec entry that
/// had no user-supplied component. The flag travels with the type, so it can
/// be queried wherever the type ends up.
#[derive(Clone)]
pub struct ComponentType {
    inner: Arc<ComponentInner>,
}

#[derive(Debug)]
struct ComponentInner {
    id: ComponentId,
    name: String,
    synthesized: bool,
}

impl ComponentType {
    /// Create a new component type with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ComponentInner {
                id: ComponentId::next(),
                name: name.into(),
                synthesized: false,
            }),
        }
    }

    /// The identity of this component type.
    pub fn id(&self) -> ComponentId {
        self.inner.id
    }

    /// Display name, as shown in markup and diagnostics.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether this type was generated as a proxy for a spec entry without a
    /// user-supplied component.
    pub fn is_synthesized(&self) -> bool {
        self.inner.synthesized
    }

    /// Start an element of this component type.
    pub fn element(&self) -> Element {
        Element::new(self.clone())
    }

    /// The same identity, flagged as synthesized.
    pub(crate) fn into_synthesized(self) -> Self {
        if self.is_synthesized() {
            return self;
        }
        Self {
            inner: Arc::new(ComponentInner {
                id: self.inner.id,
                name: self.inner.name.clone(),
                synthesized: true,
            }),
        }
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({}#{}", self.inner.name, self.inner.id.0)?;
        if self.inner.synthesized {
            f.write_str(", synthesized")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}
