//! Configuration for [`WithGroupedChildren`](crate::WithGroupedChildren).

use std::fmt;

use crate::component::ComponentType;
use crate::error::BoxError;
use crate::extract::{
    ChildMatcher, TraverseChildren, default_component_matcher, default_traverse_children,
};
use crate::flatten::{ChildrenToArray, children_to_array};
use crate::node::Node;
use crate::spec::ComponentFactory;

/// Produces the display name of a wrapped component.
pub type ComponentNameFn = dyn Fn() -> String + Send + Sync;

/// Overrides for how children are flattened, matched and traversed.
///
/// Every setting is optional:
///
/// | setting                     | default                                     |
/// |-----------------------------|---------------------------------------------|
/// | [`children_to_array`]       | [`crate::children_to_array`]                |
/// | [`proxy_component_factory`] | a component named `{Root}.{Group}`          |
/// | [`component_matcher`]       | [`default_component_matcher`]               |
/// | [`traverse_children`]       | [`default_traverse_children`]               |
/// | [`get_component_name`]      | `WithGroupedChildren({Root})`               |
///
/// `T` is what the traversal produces for each child matched under a
/// synthesized component: by default that child's own children.
///
/// [`children_to_array`]: Config::children_to_array
/// [`proxy_component_factory`]: Config::proxy_component_factory
/// [`component_matcher`]: Config::component_matcher
/// [`traverse_children`]: Config::traverse_children
/// [`get_component_name`]: Config::get_component_name
pub struct Config<T = Vec<Node>> {
    children_to_array: Option<Box<ChildrenToArray>>,
    proxy_component_factory: Option<Box<ComponentFactory<'static>>>,
    component_matcher: Option<Box<ChildMatcher<'static>>>,
    traverse_children: Box<TraverseChildren<'static, T>>,
    get_component_name: Option<Box<ComponentNameFn>>,
}

impl Config {
    /// The default configuration.
    pub fn new() -> Self {
        Self {
            children_to_array: None,
            proxy_component_factory: None,
            component_matcher: None,
            traverse_children: Box::new(default_traverse_children),
            get_component_name: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Config<T> {
    /// Use a custom flattener. It must return a freshly built list.
    pub fn children_to_array<F>(mut self, f: F) -> Self
    where
        F: Fn(Node) -> Result<Vec<Node>, BoxError> + Send + Sync + 'static,
    {
        self.children_to_array = Some(Box::new(f));
        self
    }

    /// Use a custom factory for the components of spec entries that have none.
    /// It is called with the spec key.
    pub fn proxy_component_factory<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<ComponentType, BoxError> + Send + Sync + 'static,
    {
        self.proxy_component_factory = Some(Box::new(f));
        self
    }

    /// Use a custom matcher, called with the child, the spec key and the
    /// group's component type.
    pub fn component_matcher<F>(mut self, f: F) -> Self
    where
        F: Fn(&Node, &str, &ComponentType) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.component_matcher = Some(Box::new(f));
        self
    }

    /// Use a custom traversal for children matched under synthesized
    /// components. Returning `None` drops the child from its group.
    pub fn traverse_children<U, F>(self, f: F) -> Config<U>
    where
        F: Fn(Node) -> Result<Option<U>, BoxError> + Send + Sync + 'static,
    {
        Config {
            children_to_array: self.children_to_array,
            proxy_component_factory: self.proxy_component_factory,
            component_matcher: self.component_matcher,
            traverse_children: Box::new(f),
            get_component_name: self.get_component_name,
        }
    }

    /// Use a custom display name. An empty name falls back to the default.
    pub fn get_component_name<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.get_component_name = Some(Box::new(f));
        self
    }

    pub(crate) fn children_to_array_fn(&self) -> &ChildrenToArray {
        match &self.children_to_array {
            Some(f) => &**f,
            None => &children_to_array,
        }
    }

    pub(crate) fn component_matcher_fn(&self) -> &ChildMatcher<'static> {
        match &self.component_matcher {
            Some(f) => &**f,
            None => &default_component_matcher,
        }
    }

    pub(crate) fn traverse_children_fn(&self) -> &TraverseChildren<'static, T> {
        &*self.traverse_children
    }

    pub(crate) fn proxy_component_factory_fn(&self) -> Option<&ComponentFactory<'static>> {
        self.proxy_component_factory.as_deref()
    }

    pub(crate) fn component_name(&self) -> Option<String> {
        self.get_component_name
            .as_ref()
            .map(|f| f())
            .filter(|name| !name.is_empty())
    }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn setting<X: ?Sized>(value: &Option<Box<X>>) -> &'static str {
            if value.is_some() { "custom" } else { "default" }
        }
        f.debug_struct("Config")
            .field("children_to_array", &setting(&self.children_to_array))
            .field("proxy_component_factory", &setting(&self.proxy_component_factory))
            .field("component_matcher", &setting(&self.component_matcher))
            .field("get_component_name", &setting(&self.get_component_name))
            .finish_non_exhaustive()
    }
}
