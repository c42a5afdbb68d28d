//! Group specifications and their normalization.

use std::ops::Index;

use indexmap::IndexMap;

use crate::component::ComponentType;
use crate::error::{BoxError, GroupingError};
use crate::tracing_macros::{debug, trace};

/// Creates the proxy component for a spec entry that has none.
///
/// Called with the spec key (e.g. `"Footer"`). The lifetime bounds what the
/// factory may borrow.
pub type ComponentFactory<'a> =
    dyn Fn(&str) -> Result<ComponentType, BoxError> + Send + Sync + 'a;

/// Declares the groups a component accepts.
///
/// An ordered map from group key to an optional component type. Keys are
/// PascalCase by convention; they are delivered camelCased (see
/// [`uncapitalize`](crate::uncapitalize)). Entries without a component get a
/// generated proxy component during [`parse_grouping_spec`], and their group
/// receives the *children* of each proxy element rather than the element.
///
/// ```
/// use grouped_children::{ComponentType, GroupSpec};
///
/// let header = ComponentType::new("Header");
/// let spec = GroupSpec::new()
///     .group("Header", header.clone())
///     .group("Footer", None);
/// assert_eq!(spec.len(), 2);
/// assert_eq!(spec.get("Header"), Some(Some(&header)));
/// assert_eq!(spec.get("Footer"), Some(None));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GroupSpec {
    groups: IndexMap<String, Option<ComponentType>>,
}

impl GroupSpec {
    /// An empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group. Re-declaring a key replaces its component but keeps its
    /// original position.
    pub fn group(mut self, key: impl Into<String>, ty: impl Into<Option<ComponentType>>) -> Self {
        self.insert(key, ty);
        self
    }

    /// Add a group whose component will be generated.
    pub fn proxy(self, key: impl Into<String>) -> Self {
        self.group(key, None)
    }

    /// Add a group in place.
    pub fn insert(&mut self, key: impl Into<String>, ty: impl Into<Option<ComponentType>>) {
        self.groups.insert(key.into(), ty.into());
    }

    /// Look up a key. The outer `Option` is the key's presence, the inner one
    /// the component.
    pub fn get(&self, key: &str) -> Option<Option<&ComponentType>> {
        self.groups.get(key).map(Option::as_ref)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ComponentType>)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<ComponentType>)> for GroupSpec {
    fn from_iter<I: IntoIterator<Item = (K, Option<ComponentType>)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (key, ty) in iter {
            spec.insert(key, ty);
        }
        spec
    }
}

/// A [`GroupSpec`] with every entry resolved to a concrete component type.
///
/// Produced once by [`parse_grouping_spec`] and then only read. Generated
/// entries are recognizable through [`ComponentType::is_synthesized`].
#[derive(Debug, Clone)]
pub struct NormalizedSpec {
    groups: IndexMap<String, ComponentType>,
}

impl NormalizedSpec {
    /// The component type for a key.
    pub fn get(&self, key: &str) -> Option<&ComponentType> {
        self.groups.get(key)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentType)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate only the entries whose component was generated.
    pub fn synthesized(&self) -> impl Iterator<Item = (&str, &ComponentType)> {
        self.iter().filter(|(_, ty)| ty.is_synthesized())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Index<&str> for NormalizedSpec {
    type Output = ComponentType;

    /// # Panics
    ///
    /// Panics if `key` is not part of the spec.
    fn index(&self, key: &str) -> &ComponentType {
        match self.groups.get(key) {
            Some(ty) => ty,
            None => panic!("no group `{key}` in spec"),
        }
    }
}

/// Resolve every entry of `spec` to a concrete component type.
///
/// User-supplied components are kept as they are. For every entry without
/// one, `factory` is called once with the entry's key and its result is
/// flagged as synthesized. Normalizing the same spec twice calls the factory
/// again, so component identities from separate normalizations differ:
/// normalize once and share the result.
///
/// If the factory fails, no spec is produced.
pub fn parse_grouping_spec(
    spec: &GroupSpec,
    factory: &ComponentFactory<'_>,
) -> Result<NormalizedSpec, GroupingError> {
    let mut groups = IndexMap::with_capacity(spec.len());
    for (key, ty) in spec.iter() {
        let ty = match ty {
            Some(ty) => ty.clone(),
            None => {
                let produced = factory(key).map_err(|source| GroupingError::Factory {
                    group: key.to_owned(),
                    source,
                })?;
                trace!(group = key, component = produced.name(), "generated proxy component");
                produced.into_synthesized()
            }
        };
        groups.insert(key.to_owned(), ty);
    }
    let normalized = NormalizedSpec { groups };
    debug!(
        groups = normalized.len(),
        synthesized = normalized.synthesized().count(),
        "normalized grouping spec"
    );
    Ok(normalized)
}
