//! End-to-end render scenarios against a container node.

use spark_reconcile::{
    h, live_subscription_count, mutation_kinds, render, reset_config, reset_mutations,
    set_record_mutations, Component, HostNode, MutationKind, Props, VirtualElement,
};
use spark_signals::signal;

fn root() -> HostNode {
    HostNode::element("div").expect("div is a valid tag")
}

fn red(children: Vec<VirtualElement>) -> VirtualElement {
    h("div", Props::new().with("style", "color: red"), children)
}

fn item(tag: &str, label: &str) -> VirtualElement {
    h(tag, Props::new(), [VirtualElement::from(label)])
}

#[test]
fn test_hello_world_sequence() {
    let root = root();

    render(&red(vec!["Hello world from rendertree".into()]), &root).unwrap();
    let first = root.first_child().unwrap();

    render(&red(vec!["Hello world from rendertree again!".into()]), &root).unwrap();
    let second = root.first_child().unwrap();

    assert_eq!(root.text_content(), "Hello world from rendertree again!");
    assert_eq!(first, second, "same tag keeps the root node");

    render(
        &red(vec![item("div", "One"), item("div", "Two"), item("div", "Three")]),
        &root,
    )
    .unwrap();
    let element_two = root.first_child().unwrap().child(1).unwrap();
    assert_eq!(root.text_content(), "OneTwoThree");

    render(&red(vec![item("div", "One"), item("div", "Two")]), &root).unwrap();
    let container = root.first_child().unwrap();
    assert_eq!(container.child(1), Some(element_two.clone()), "shrink keeps leading children");
    assert_eq!(container.child_count(), 2);

    render(&red(vec![item("div", "One"), item("section", "Two")]), &root).unwrap();
    let replaced = container.child(1).unwrap();
    assert_ne!(replaced, element_two, "retyped child is replaced");
    assert!(replaced.has_tag("section"));
    assert_eq!(
        root.to_html(),
        r#"<div><div style="color: red"><div>One</div><section>Two</section></div></div>"#
    );
}

#[test]
fn test_div_to_section_replaces_root() {
    let root = root();
    let div = render(&h("div", Props::new(), []), &root).unwrap();
    let section = render(&h("section", Props::new(), []), &root).unwrap();

    assert_ne!(div, section);
    assert_eq!(root.children(), vec![section]);
}

#[test]
fn test_attribute_convergence() {
    reset_config();
    set_record_mutations(true);
    let root = root();

    let node = render(&h("div", Props::new().with("style", "color:red"), []), &root).unwrap();
    reset_mutations();

    render(&h("div", Props::new(), []), &root).unwrap();
    assert_eq!(node.attribute("style"), None);
    assert!(node.attributes().is_empty());
    assert_eq!(
        spark_reconcile::mutation_count(MutationKind::REMOVE_ATTRIBUTE),
        1,
        "exactly the style attribute is removed"
    );
    reset_config();
}

#[test]
fn test_counter_replay_and_disposal() {
    reset_config();
    let root = root();
    let before = live_subscription_count();

    let counter = signal(0);
    let counter_read = counter.clone();
    let view = Component::named("Counter", move |_: &Props| {
        VirtualElement::text(format!("Count: {}", counter_read.get()))
    });

    let text = render(&h(view, Props::new(), []), &root).unwrap();
    assert_eq!(text.text_value().as_deref(), Some("Count: 0"));

    counter.set(1);
    assert_eq!(root.first_child(), Some(text.clone()), "no node replacement");
    assert_eq!(text.text_value().as_deref(), Some("Count: 1"));

    render(&h("p", Props::new(), ["static sibling".into()]), &root).unwrap();
    assert_eq!(live_subscription_count(), before);
    let html = root.to_html();

    set_record_mutations(true);
    reset_mutations();
    counter.set(2);
    assert_eq!(root.to_html(), html);
    assert_eq!(mutation_kinds(), MutationKind::empty(), "disposed binding writes nothing");
    reset_config();
}

#[test]
fn test_null_round_trip() {
    let root = root();
    let div = render(&h("div", Props::new(), ["content".into()]), &root).unwrap();

    let placeholder = render(&VirtualElement::Null, &root).unwrap();
    assert!(placeholder.is_placeholder());
    assert!(div.parent().is_none());
    assert_eq!(root.child_count(), 1);
    assert_eq!(root.text_content(), "");

    let restored = render(&h("div", Props::new(), ["again".into()]), &root).unwrap();
    assert!(restored.has_tag("div"));
    assert_eq!(root.children(), vec![restored]);
    assert_eq!(root.text_content(), "again");
}

#[test]
fn test_list_component_with_conditional_children() {
    reset_config();
    let root = root();
    let items = signal(vec!["a".to_string(), "b".to_string()]);
    let items_read = items.clone();
    let list = Component::named("List", move |_: &Props| {
        h(
            "ul",
            Props::new(),
            items_read
                .get()
                .into_iter()
                .map(|label| h("li", Props::new(), [VirtualElement::text(label)])),
        )
    });

    let ul = render(&h(list, Props::new(), []), &root).unwrap();
    let first_li = ul.child(0).unwrap();
    assert_eq!(ul.to_html(), "<ul><li>a</li><li>b</li></ul>");

    items.set(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    assert_eq!(ul.to_html(), "<ul><li>a</li><li>b</li><li>c</li></ul>");
    assert_eq!(ul.child(0), Some(first_li.clone()));

    items.set(vec!["z".to_string()]);
    assert_eq!(ul.to_html(), "<ul><li>z</li></ul>");
    assert_eq!(ul.child(0), Some(first_li), "positional reuse, content patched");
}
