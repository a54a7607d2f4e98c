//! Subscription - The reactive binding stored on a host node.
//!
//! A subscription wraps the stop handle of the effect that keeps a component's
//! position up to date. It is owned by the node it renders into, so there is
//! never more than one per node and no global table to keep in sync.
//!
//! Disposal stops the effect exactly once. Dropping a subscription disposes it,
//! so a node that is discarded without going through the reconciler still
//! releases its effect.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::node::HostNode;

thread_local! {
    /// Number of subscriptions created and not yet disposed.
    static LIVE_SUBSCRIPTIONS: Cell<usize> = const { Cell::new(0) };
}

/// Live registration of a component's effect.
pub struct Subscription {
    label: Option<Rc<str>>,
    stop: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(label: Option<Rc<str>>, stop: impl FnOnce() + 'static) -> Self {
        LIVE_SUBSCRIPTIONS.with(|live| live.set(live.get() + 1));
        trace!(component = label.as_deref().unwrap_or("<anonymous>"), "subscription created");
        Self {
            label,
            stop: Some(Box::new(stop)),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.stop.is_some()
    }

    /// Stop the effect. Future signal changes no longer reach this position.
    pub fn dispose(mut self) {
        self.stop_effect();
    }

    fn stop_effect(&mut self) {
        let Some(stop) = self.stop.take() else { return };
        LIVE_SUBSCRIPTIONS.with(|live| live.set(live.get().saturating_sub(1)));
        trace!(
            component = self.label().unwrap_or("<anonymous>"),
            "subscription disposed"
        );
        stop();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop_effect();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("live", &self.is_live())
            .finish()
    }
}

/// Dispose the subscription of `node` and of every descendant.
///
/// Called before a node leaves the tree.
pub fn dispose_subtree(node: &HostNode) {
    if let Some(subscription) = node.take_subscription() {
        subscription.dispose();
    }
    for child in node.children() {
        dispose_subtree(&child);
    }
}

/// Get the count of subscriptions that have not been disposed.
pub fn live_subscription_count() -> usize {
    LIVE_SUBSCRIPTIONS.with(|live| live.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_subscription(stops: &Rc<Cell<usize>>) -> Subscription {
        let stops = stops.clone();
        Subscription::new(Some(Rc::from("test")), move || stops.set(stops.get() + 1))
    }

    #[test]
    fn test_dispose_stops_once() {
        let stops = Rc::new(Cell::new(0));
        let before = live_subscription_count();

        let sub = counting_subscription(&stops);
        assert!(sub.is_live());
        assert_eq!(live_subscription_count(), before + 1);

        sub.dispose();
        assert_eq!(stops.get(), 1, "dispose should stop the effect once");
        assert_eq!(live_subscription_count(), before);
    }

    #[test]
    fn test_drop_stops_effect() {
        let stops = Rc::new(Cell::new(0));
        {
            let _sub = counting_subscription(&stops);
        }
        assert_eq!(stops.get(), 1, "dropping should stop the effect");
    }

    #[test]
    fn test_node_drop_releases_subscription() {
        let stops = Rc::new(Cell::new(0));
        let node = HostNode::text("x");
        node.set_subscription(counting_subscription(&stops));
        assert!(node.has_subscription());

        drop(node);
        assert_eq!(stops.get(), 1, "discarded node should not leak its effect");
    }

    #[test]
    fn test_dispose_subtree() {
        let stops = Rc::new(Cell::new(0));
        let root = HostNode::element("div").unwrap();
        let child = HostNode::element("p").unwrap();
        let leaf = HostNode::text("x");
        child.append_child(&leaf).unwrap();
        root.append_child(&child).unwrap();

        root.set_subscription(counting_subscription(&stops));
        leaf.set_subscription(counting_subscription(&stops));

        dispose_subtree(&root);
        assert_eq!(stops.get(), 2);
        assert!(!root.has_subscription());
        assert!(!leaf.has_subscription());

        // Second pass finds nothing left to stop
        dispose_subtree(&root);
        assert_eq!(stops.get(), 2);
    }
}
