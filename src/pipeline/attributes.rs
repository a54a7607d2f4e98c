//! Attribute synchronization.

use tracing::trace;

use crate::engine::HostNode;
use crate::error::HostError;
use crate::types::Props;

/// Converge the attribute set of `target` to `props`.
///
/// Absent props count as empty. Stale attributes are removed first, then
/// every prop is written. The write happens even when the value is already
/// equal; the host treats it as a no-op.
pub fn sync_attributes(target: &HostNode, props: Option<&Props>) -> Result<(), HostError> {
    let empty = Props::new();
    let props = props.unwrap_or(&empty);

    for name in target.attribute_names()? {
        if !props.contains_key(&name) {
            trace!(node = %target.id(), attribute = %name, "removing attribute");
            target.remove_attribute(&name)?;
        }
    }

    for (name, value) in props.iter() {
        target.set_attribute(name, &value.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{reset_config, set_record_mutations};
    use crate::engine::{reset_mutations, take_mutations, MutationKind};

    #[test]
    fn test_sync_sets_and_removes() {
        let div = HostNode::element("div").unwrap();
        div.set_attribute("style", "color:red").unwrap();
        div.set_attribute("id", "old").unwrap();

        let props = Props::new().with("id", "new").with("tabindex", 3);
        sync_attributes(&div, Some(&props)).unwrap();

        assert_eq!(div.attribute("style"), None, "stale attribute should be removed");
        assert_eq!(div.attribute("id").as_deref(), Some("new"));
        assert_eq!(div.attribute("tabindex").as_deref(), Some("3"));
    }

    #[test]
    fn test_absent_props_clear_everything() {
        let div = HostNode::element("div").unwrap();
        div.set_attribute("style", "color:red").unwrap();
        div.set_attribute("title", "t").unwrap();

        sync_attributes(&div, None).unwrap();
        assert!(div.attributes().is_empty());
    }

    #[test]
    fn test_removals_happen_before_writes() {
        reset_config();
        set_record_mutations(true);

        let div = HostNode::element("div").unwrap();
        div.set_attribute("a", "1").unwrap();
        reset_mutations();

        sync_attributes(&div, Some(&Props::new().with("b", "2"))).unwrap();

        let kinds: Vec<MutationKind> = take_mutations().into_iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MutationKind::REMOVE_ATTRIBUTE, MutationKind::SET_ATTRIBUTE]);
        reset_config();
    }

    #[test]
    fn test_equal_values_still_written() {
        reset_config();
        set_record_mutations(true);

        let div = HostNode::element("div").unwrap();
        let props = Props::new().with("id", "same");
        sync_attributes(&div, Some(&props)).unwrap();
        reset_mutations();

        sync_attributes(&div, Some(&props)).unwrap();
        let kinds: Vec<MutationKind> = take_mutations().into_iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MutationKind::SET_ATTRIBUTE]);
        reset_config();
    }

    #[test]
    fn test_rejects_text_target() {
        let text = HostNode::text("x");
        assert!(matches!(
            sync_attributes(&text, None),
            Err(HostError::NotAnElement { .. })
        ));
    }
}
