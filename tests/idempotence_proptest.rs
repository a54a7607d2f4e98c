//! Property tests: rendering the same tree twice is a no-op.

use proptest::prelude::*;
use spark_reconcile::{
    h, mutation_kinds, render, reset_config, reset_mutations, set_record_mutations, HostNode,
    MutationKind, Props, VirtualElement,
};

/// Plain data mirror of a virtual tree, so proptest can clone and shrink it.
#[derive(Debug, Clone)]
enum Shape {
    Null,
    Text(String),
    Tag {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Shape>,
    },
}

impl Shape {
    fn build(&self) -> VirtualElement {
        match self {
            Shape::Null => VirtualElement::Null,
            Shape::Text(content) => VirtualElement::text(content.clone()),
            Shape::Tag { tag, attrs, children } => h(
                tag.as_str(),
                attrs.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<Props>(),
                children.iter().map(Shape::build),
            ),
        }
    }
}

/// Serialization that ignores attribute order, which reuse does not preserve.
fn canonical(node: &HostNode) -> String {
    match node.tag_name() {
        None => node.text_value().unwrap_or_default(),
        Some(tag) => {
            let mut attrs = node.attributes();
            attrs.sort();
            let children: String = node.children().iter().map(canonical).collect();
            format!("<{} {:?}>{}</>", tag.to_ascii_lowercase(), attrs, children)
        }
    }
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Null),
        "[a-z ]{0,8}".prop_map(Shape::Text),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop_oneof![Just("div"), Just("span"), Just("p"), Just("SECTION")],
            prop::collection::vec(("[a-z]{1,5}", "[a-z0-9]{0,6}"), 0..3),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, attrs, children)| Shape::Tag {
                tag: tag.to_string(),
                attrs,
                children,
            })
    })
}

proptest! {
    #[test]
    fn prop_second_render_is_noop(tree in shape()) {
        reset_config();
        set_record_mutations(true);
        let root = HostNode::element("div").unwrap();

        let first = render(&tree.build(), &root).unwrap();
        let html = root.to_html();
        reset_mutations();

        let second = render(&tree.build(), &root).unwrap();
        let kinds = mutation_kinds();
        reset_config();

        prop_assert_eq!(first, second);
        prop_assert_eq!(root.to_html(), html);
        prop_assert!(
            !kinds.intersects(
                MutationKind::STRUCTURAL | MutationKind::SET_TEXT | MutationKind::REMOVE_ATTRIBUTE
            ),
            "unexpected writes: {:?}", kinds
        );
    }

    #[test]
    fn prop_rerender_converges(before in shape(), after in shape()) {
        let root = HostNode::element("div").unwrap();
        render(&before.build(), &root).unwrap();
        render(&after.build(), &root).unwrap();

        let fresh = HostNode::element("div").unwrap();
        render(&after.build(), &fresh).unwrap();

        prop_assert_eq!(canonical(&root), canonical(&fresh));
    }
}
