//! Wrapping a component so it receives its children grouped.

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use crate::component::ComponentType;
use crate::config::Config;
use crate::error::{BoxError, GroupingError};
use crate::extract::{ExtractedChildren, GroupedChildren, extract_children};
use crate::node::{Element, Node};
use crate::spec::{GroupSpec, NormalizedSpec, parse_grouping_spec};
use crate::tracing_macros::debug;

/// What a wrapped component receives on each render.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedProps<P, T = Vec<Node>> {
    /// The props the wrapper was rendered with.
    pub props: P,
    /// One entry per spec key, camelCased.
    pub groups: GroupedChildren<T>,
    /// Children that matched no group.
    pub children: Vec<Node>,
}

/// A render function taking grouped props.
pub trait Component<P, T = Vec<Node>> {
    /// What rendering produces.
    type Output;

    /// The name used to derive the wrapper's display name and the names of
    /// generated proxy components.
    ///
    /// Defaults to the type's name without its path or generic arguments.
    fn display_name(&self) -> Cow<'_, str> {
        let name = type_name::<Self>();
        let base = name.split('<').next().unwrap_or(name);
        Cow::Borrowed(base.rsplit("::").next().unwrap_or(base))
    }

    /// Render with grouped children.
    fn render(&self, props: GroupedProps<P, T>) -> Self::Output;
}

/// A [`Component`] made from a closure and a name.
pub struct FnComponent<F> {
    name: String,
    render: F,
}

/// Make a named [`Component`] from a closure.
///
/// ```
/// use grouped_children::{GroupedProps, component};
///
/// let card = component("Card", |props: GroupedProps<()>| props.children.len());
/// assert_eq!(card.name(), "Card");
/// ```
pub fn component<F>(name: impl Into<String>, render: F) -> FnComponent<F> {
    FnComponent {
        name: name.into(),
        render,
    }
}

impl<F> FnComponent<F> {
    /// The name given to [`component`].
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<P, T, O, F> Component<P, T> for FnComponent<F>
where
    F: Fn(GroupedProps<P, T>) -> O,
{
    type Output = O;

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn render(&self, props: GroupedProps<P, T>) -> O {
        (self.render)(props)
    }
}

impl<F> fmt::Debug for FnComponent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComponent")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A component that receives its children grouped.
///
/// The spec is normalized once, when wrapping; the resulting component types
/// are reachable with [`marker`](Self::marker) or by indexing with the spec
/// key, so callers can build the elements the groups look for. Every
/// [`render`](Self::render) flattens the children, partitions them and hands
/// the groups plus the remainder to the wrapped component.
///
/// ```
/// use grouped_children::{
///     ComponentType, Config, GroupSpec, GroupedProps, Node, WithGroupedChildren, component,
/// };
///
/// let header = ComponentType::new("Header");
/// let spec = GroupSpec::new().group("Header", header.clone()).proxy("Footer");
/// let card = WithGroupedChildren::new(
///     &spec,
///     Config::new(),
///     component("Card", |mut props: GroupedProps<()>| {
///         let footer = props.groups.take("footer").unwrap_or_default();
///         (props.groups["header"].len(), footer.len(), props.children.len())
///     }),
/// )
/// .unwrap();
///
/// assert_eq!(card.display_name(), "WithGroupedChildren(Card)");
/// assert_eq!(card["Footer"].name(), "Card.Footer");
///
/// let children = Node::Fragment(vec![
///     header.element().with_child("title").into(),
///     "body".into(),
///     card.element("Footer").with_child("fine print").into(),
/// ]);
/// assert_eq!(card.render((), children).unwrap(), (1, 1, 1));
/// ```
pub struct WithGroupedChildren<C, P, T = Vec<Node>> {
    component: C,
    spec: NormalizedSpec,
    config: Config<T>,
    display_name: String,
    _props: PhantomData<fn(P)>,
}

impl<C, P, T> WithGroupedChildren<C, P, T>
where
    C: Component<P, T>,
{
    /// Wrap `component`, normalizing `spec` with the factory from `config`.
    pub fn new(spec: &GroupSpec, config: Config<T>, component: C) -> Result<Self, GroupingError> {
        let root = component.display_name().into_owned();
        let spec = match config.proxy_component_factory_fn() {
            Some(factory) => parse_grouping_spec(spec, factory)?,
            None => {
                let factory = |key: &str| -> Result<ComponentType, BoxError> {
                    Ok(ComponentType::new(format!("{root}.{key}")))
                };
                parse_grouping_spec(spec, &factory)?
            }
        };
        let display_name = config
            .component_name()
            .unwrap_or_else(|| format!("WithGroupedChildren({root})"));
        debug!(name = %display_name, groups = spec.len(), "wrapped component");
        Ok(Self {
            component,
            spec,
            config,
            display_name,
            _props: PhantomData,
        })
    }

    /// Render with `props` and `children`.
    ///
    /// Fails only if one of the configured callbacks fails; the wrapped
    /// component is not called in that case.
    pub fn render(&self, props: P, children: impl Into<Node>) -> Result<C::Output, GroupingError> {
        let ExtractedChildren { groups, rest } =
            extract_children(children.into(), &self.spec, &self.config)?;
        Ok(self.component.render(GroupedProps {
            props,
            groups,
            children: rest,
        }))
    }
}

impl<C, P, T> WithGroupedChildren<C, P, T> {
    /// Name for diagnostics, e.g. `WithGroupedChildren(Card)`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The normalized spec.
    pub fn spec(&self) -> &NormalizedSpec {
        &self.spec
    }

    /// The component type of a group, by spec key (`"Footer"`).
    pub fn marker(&self, key: &str) -> Option<&ComponentType> {
        self.spec.get(key)
    }

    /// Start an element of a group's component type.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not part of the spec.
    pub fn element(&self, key: &str) -> Element {
        self[key].element()
    }

    /// The wrapped component.
    pub fn inner(&self) -> &C {
        &self.component
    }
}

impl<C, P, T> Index<&str> for WithGroupedChildren<C, P, T> {
    type Output = ComponentType;

    fn index(&self, key: &str) -> &ComponentType {
        &self.spec[key]
    }
}

impl<C, P, T> fmt::Debug for WithGroupedChildren<C, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithGroupedChildren")
            .field("display_name", &self.display_name)
            .field("spec", &self.spec)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
