//! Wrapping components with grouped children.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use grouped_children::{
    BoxError, Component, ComponentType, Config, Extracted, GroupSpec, GroupedProps, GroupingError,
    Node, WithGroupedChildren, component, markup,
};
use grouped_children_testhelpers::IPanic;

#[derive(Debug, Clone, PartialEq)]
struct TestProps {
    test_prop: &'static str,
}

fn children_spec(group: &ComponentType) -> GroupSpec {
    GroupSpec::new()
        .group("GroupName", group.clone())
        .proxy("GroupWithProxy")
        .proxy("EmptyGroupWithProxy")
}

/// Renders to the props it was given, so tests can inspect them.
fn echo() -> impl Fn(GroupedProps<TestProps>) -> GroupedProps<TestProps> {
    |props: GroupedProps<TestProps>| props
}

#[test]
fn display_name_from_component_name() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let group = ComponentType::new("GroupComponent");
    let wrapped =
        WithGroupedChildren::new(&children_spec(&group), Config::new(), component("Card", echo()))?;
    assert_eq!(wrapped.display_name(), "WithGroupedChildren(Card)");
    Ok(())
}

#[test]
fn display_name_from_config() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let group = ComponentType::new("GroupComponent");
    let wrapped = WithGroupedChildren::new(
        &children_spec(&group),
        Config::new().get_component_name(|| "CustomName".to_owned()),
        component("Card", echo()),
    )?;
    assert_eq!(wrapped.display_name(), "CustomName");
    Ok(())
}

#[test]
fn markers_are_discoverable() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let group = ComponentType::new("GroupComponent");
    let wrapped =
        WithGroupedChildren::new(&children_spec(&group), Config::new(), component("Card", echo()))?;

    assert_eq!(wrapped["GroupName"], group);
    assert!(!wrapped["GroupName"].is_synthesized());
    assert_eq!(wrapped["GroupWithProxy"].name(), "Card.GroupWithProxy");
    assert!(wrapped["GroupWithProxy"].is_synthesized());
    assert!(wrapped.marker("EmptyGroupWithProxy").is_some_and(ComponentType::is_synthesized));
    assert!(wrapped.marker("Missing").is_none());
    assert_eq!(wrapped.spec().len(), 3);
    Ok(())
}

#[test]
fn passes_props_and_non_matching_children() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let group = ComponentType::new("GroupComponent");
    let wrapped =
        WithGroupedChildren::new(&children_spec(&group), Config::new(), component("Card", echo()))?;
    let children = vec![Node::from(1), Node::from(2), Node::from(3)];

    let received = wrapped.render(TestProps { test_prop: "test" }, children.clone())?;

    assert_eq!(received.props, TestProps { test_prop: "test" });
    assert_eq!(
        received.groups.keys().collect::<Vec<_>>(),
        ["groupName", "groupWithProxy", "emptyGroupWithProxy"]
    );
    assert!(received.groups.iter().all(|(_, entries)| entries.is_empty()));
    assert_eq!(received.children, children);
    Ok(())
}

#[test]
fn passes_grouped_children() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let group = ComponentType::new("GroupComponent");
    let wrapped =
        WithGroupedChildren::new(&children_spec(&group), Config::new(), component("Card", echo()))?;

    let child1 = wrapped.element("GroupName").with_key("1").with_child(1);
    let child2 = wrapped.element("GroupName").with_key("2").with_child(2);
    let child3 = wrapped
        .element("GroupWithProxy")
        .with_key("3")
        .with_child("child of GroupWithProxy 3");
    let child4 = wrapped.element("GroupWithProxy").with_key("4").with_children([
        "child 1 of GroupWithProxy 4",
        "child 2 of GroupWithProxy 4",
    ]);
    let child5 = wrapped.element("EmptyGroupWithProxy").with_key("5");
    let children = Node::Fragment(vec![
        child5.into(),
        child1.clone().into(),
        child3.into(),
        child2.clone().into(),
        child4.into(),
        "random".into(),
    ]);

    let received = wrapped.render(TestProps { test_prop: "test" }, children)?;

    assert_eq!(
        received.groups["groupName"],
        [
            Extracted::Child(child1.with_key(".$1").into()),
            Extracted::Child(child2.with_key(".$2").into()),
        ]
    );
    assert_eq!(
        received.groups["groupWithProxy"],
        [
            Extracted::Traversed(vec![Node::from("child of GroupWithProxy 3")]),
            Extracted::Traversed(vec![
                Node::from("child 1 of GroupWithProxy 4"),
                Node::from("child 2 of GroupWithProxy 4"),
            ]),
        ]
    );
    assert!(received.groups["emptyGroupWithProxy"].is_empty());
    assert_eq!(received.children, [Node::from("random")]);
    Ok(())
}

#[test]
fn uses_provided_children_to_array() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let group = ComponentType::new("GroupComponent");
    let wrapped = WithGroupedChildren::new(
        &children_spec(&group),
        Config::new().children_to_array(move |children| {
            recorder.lock().unwrap().push(children);
            Ok(vec![Node::from(1), Node::from(2), Node::from(3)])
        }),
        component("Card", echo()),
    )?;

    let received = wrapped.render(TestProps { test_prop: "test" }, "test children")?;

    assert_eq!(*seen.lock().unwrap(), [Node::from("test children")]);
    assert_eq!(received.groups.entry_count(), 0);
    assert_eq!(
        received.children,
        [Node::from(1), Node::from(2), Node::from(3)]
    );
    Ok(())
}

#[test]
fn uses_provided_proxy_component_factory() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let requested = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&requested);
    let group = ComponentType::new("GroupComponent");
    let wrapped = WithGroupedChildren::new(
        &children_spec(&group),
        Config::new().proxy_component_factory(move |key| {
            recorder.lock().unwrap().push(key.to_owned());
            Ok(ComponentType::new(format!("Custom{key}")))
        }),
        component("Card", echo()),
    )?;

    // Normalized once, at wrap time.
    wrapped.render(TestProps { test_prop: "a" }, Node::Null)?;
    wrapped.render(TestProps { test_prop: "b" }, Node::Null)?;

    assert_eq!(
        *requested.lock().unwrap(),
        ["GroupWithProxy", "EmptyGroupWithProxy"]
    );
    assert_eq!(wrapped["GroupWithProxy"].name(), "CustomGroupWithProxy");
    assert!(wrapped["GroupWithProxy"].is_synthesized());
    Ok(())
}

#[test]
fn uses_provided_traverse_children() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let group = ComponentType::new("GroupComponent");
    let config = Config::new().traverse_children(move |child: Node| -> Result<Option<i64>, BoxError> {
        counter.fetch_add(1, Ordering::Relaxed);
        let count = child.as_element().map_or(0, |e| e.children().len());
        Ok(Some(if count == 0 { -1 } else { count as i64 }))
    });
    let wrapped = WithGroupedChildren::new(
        &children_spec(&group),
        config,
        component("Card", |props: GroupedProps<(), i64>| props),
    )?;

    let child1 = wrapped.element("GroupName").with_key("1").with_child(1);
    let child2 = wrapped.element("GroupName").with_key("2").with_child(2);
    let child3 = wrapped
        .element("GroupWithProxy")
        .with_key("3")
        .with_child("child of GroupWithProxy 3");
    let child4 = wrapped
        .element("GroupWithProxy")
        .with_key("4")
        .with_children(["child 1", "child 2"]);
    let child5 = wrapped.element("EmptyGroupWithProxy").with_key("5");
    let children = vec![
        Node::from(child5),
        child1.into(),
        child3.into(),
        child2.into(),
        child4.into(),
        "random".into(),
    ];

    let received = wrapped.render((), children)?;

    assert_eq!(calls.load(Ordering::Relaxed), 3);
    assert_eq!(received.groups["groupName"].len(), 2);
    assert_eq!(
        received.groups["groupWithProxy"],
        [Extracted::Traversed(1), Extracted::Traversed(2)]
    );
    assert_eq!(received.groups["emptyGroupWithProxy"], [Extracted::Traversed(-1)]);
    assert_eq!(received.children, [Node::from("random")]);
    Ok(())
}

#[test]
fn custom_matcher_sees_spec_key() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    // Group by a `slot` attribute instead of by component type.
    let spec = GroupSpec::new()
        .group("Header", ComponentType::new("Header"))
        .group("Footer", ComponentType::new("Footer"));
    let wrapped = WithGroupedChildren::new(
        &spec,
        Config::new().component_matcher(|child, key, _| {
            Ok(child
                .as_element()
                .and_then(|e| e.get_attr("slot"))
                .is_some_and(|slot| slot.eq_ignore_ascii_case(key)))
        }),
        component("Layout", |props: GroupedProps<()>| props),
    )?;

    let children = Node::Fragment(vec![
        grouped_children::Element::new("p").with_attr("slot", "footer").with_child("f").into(),
        grouped_children::Element::new("h1").with_attr("slot", "header").with_child("h").into(),
        grouped_children::Element::new("main").with_child("m").into(),
    ]);
    let received = wrapped.render((), children)?;

    let rendered = |key: &str| {
        let nodes: Vec<Node> = received.groups[key]
            .iter()
            .filter_map(|e| e.as_child().cloned())
            .collect();
        markup(&nodes)
    };
    insta::assert_snapshot!(rendered("header"), @r#"<h1 key=".1" slot="header">h</h1>"#);
    insta::assert_snapshot!(rendered("footer"), @r#"<p key=".0" slot="footer">f</p>"#);
    insta::assert_snapshot!(markup(&received.children), @r#"<main key=".2">m</main>"#);
    Ok(())
}

#[test]
fn factory_failure_fails_wrapping() {
    grouped_children_testhelpers::setup();

    let group = ComponentType::new("GroupComponent");
    let result = WithGroupedChildren::new(
        &children_spec(&group),
        Config::new().proxy_component_factory(|key| Err(format!("no proxy for {key}").into())),
        component("Card", echo()),
    );

    let err = result.unwrap_err();
    assert_eq!(err.group(), Some("GroupWithProxy"));
    assert_eq!(
        err.to_string(),
        "failed to create proxy component for `GroupWithProxy`: no proxy for GroupWithProxy"
    );
}

#[test]
fn flatten_failure_skips_render() {
    grouped_children_testhelpers::setup();

    let rendered = AtomicUsize::new(0);
    let wrapped = WithGroupedChildren::new(
        &GroupSpec::new().proxy("Slot"),
        Config::new().children_to_array(|_| Err("not iterable".into())),
        component("Card", |_: GroupedProps<()>| {
            rendered.fetch_add(1, Ordering::Relaxed);
        }),
    )
    .unwrap();

    let err = wrapped.render((), Node::Null).unwrap_err();
    assert!(matches!(err, GroupingError::Flatten { .. }));
    assert_eq!(rendered.load(Ordering::Relaxed), 0);
}

#[test]
fn shared_across_threads() -> Result<(), IPanic> {
    grouped_children_testhelpers::setup();

    struct Counter;

    impl Component<()> for Counter {
        type Output = (usize, usize);

        fn render(&self, props: GroupedProps<()>) -> (usize, usize) {
            (props.groups["item"].len(), props.children.len())
        }
    }

    let wrapped = Arc::new(WithGroupedChildren::new(
        &GroupSpec::new().proxy("Item"),
        Config::new(),
        Counter,
    )?);
    assert_eq!(wrapped.display_name(), "WithGroupedChildren(Counter)");

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let wrapped = Arc::clone(&wrapped);
            std::thread::spawn(move || {
                let children: Vec<Node> = (0..n)
                    .map(|i| wrapped.element("Item").with_child(i).into())
                    .chain(std::iter::once(Node::from("rest")))
                    .collect();
                wrapped.render((), children)
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap()?, (n, 1));
    }
    Ok(())
}
