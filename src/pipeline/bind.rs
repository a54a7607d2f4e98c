//! Component Binding - Reactive replay for component positions.
//!
//! A component node is rendered inside a spark-signals `effect_sync`. The effect's
//! first run is the initial render; every signal the component read becomes a
//! dependency. When one of them changes, the effect runs again and replays the
//! component against the node currently occupying its position.
//!
//! # Lifecycle
//!
//! ```text
//! reconcile(Component)             effect run #1 → render + reconcile
//!   └── node.set_subscription      stop handle owned by the node
//! signal.set(..)                   effect run #n → render + reconcile (own
//!                                  subscription kept, moved if node changes)
//! reconcile over the position      subscription disposed first
//! node removed / replaced          dispose_subtree before it leaves the tree
//! node dropped                     Subscription::drop stops the effect
//! ```
//!
//! The effect only holds a weak handle to its node, so a discarded node is
//! never kept alive by the signal graph. Bindings never nest as effects: one
//! created during an outer component's run is owned by its node alone, so
//! the outer replay neither destroys it nor loses its own dependencies.
//!
//! A component that returns another component is resolved down to a host
//! element inside the same effect: one position, one subscription.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spark_signals::{effect_sync, with_context, AnyReaction, AnySource};
use tracing::{debug, error, trace};

use super::reconcile::reconcile;
use crate::config::{binding_mode, BindingMode};
use crate::engine::{HostNode, Subscription, WeakHostNode};
use crate::error::Result;
use crate::types::{Component, ElementType, Props, VirtualElement};

/// Render `component` at the position of `mount_point` and subscribe the
/// position to the signals it reads.
pub(crate) fn bind_component(
    component: &Component,
    props: &Props,
    mount_point: Option<HostNode>,
    parent: &HostNode,
) -> Result<HostNode> {
    if binding_mode() == BindingMode::Static {
        let derived = resolve(component, props);
        return reconcile(&derived, mount_point, parent, false);
    }

    let label: Option<Rc<str>> = component.name().map(Rc::from);
    let name = label.as_deref().unwrap_or("<anonymous>").to_string();

    // Result of the initial render, handed out of the effect's first run
    let first_render: Rc<RefCell<Option<Result<HostNode>>>> = Rc::default();

    let stop = {
        let first_render = first_render.clone();
        let component = component.clone();
        let props = props.clone();
        let name = name.clone();
        let mut initial = Some((mount_point, parent.clone()));
        let mut anchor = WeakHostNode::default();

        isolated_effect(move || {
            let derived = resolve(&component, &props);
            match initial.take() {
                Some((mount_point, parent)) => {
                    let result = reconcile(&derived, mount_point, &parent, false);
                    if let Ok(node) = &result {
                        anchor = node.downgrade();
                    }
                    *first_render.borrow_mut() = Some(result);
                }
                None => {
                    if let Some(node) = replay(&derived, &anchor, &name) {
                        anchor = node.downgrade();
                    }
                }
            }
        })
    };

    let rendered = first_render
        .borrow_mut()
        .take()
        .expect("effect_sync runs its first pass before returning");

    match rendered {
        Ok(node) => {
            if let Some(stale) = node.take_subscription() {
                stale.dispose();
            }
            node.set_subscription(Subscription::new(label, stop));
            trace!(component = %name, node = %node.id(), "component bound");
            Ok(node)
        }
        Err(err) => {
            stop();
            Err(err)
        }
    }
}

// =============================================================================
// Isolated Effects
// =============================================================================

/// Tracking state of the run that was active when a binding was created.
///
/// Restored on drop, so a panicking component does not leave the signal
/// context pointing at the binding.
struct OuterRun {
    reaction: Option<Weak<dyn AnyReaction>>,
    effect: Option<Weak<dyn AnyReaction>>,
    deps: Vec<Rc<dyn AnySource>>,
    skipped: usize,
}

impl OuterRun {
    fn suspend() -> Self {
        with_context(|ctx| Self {
            reaction: ctx.set_active_reaction(None),
            effect: ctx.set_active_effect(None),
            deps: ctx.swap_new_deps(Vec::new()),
            skipped: ctx.set_skipped_deps(0),
        })
    }
}

impl Drop for OuterRun {
    fn drop(&mut self) {
        let deps = std::mem::take(&mut self.deps);
        with_context(|ctx| {
            ctx.set_active_reaction(self.reaction.take());
            ctx.set_active_effect(self.effect.take());
            ctx.swap_new_deps(deps);
            ctx.set_skipped_deps(self.skipped);
        });
    }
}

/// Create and run a sync effect that belongs to no enclosing effect.
///
/// A binding created while another binding renders is not adopted as its
/// child: the outer re-run does not destroy it, and stopping it never touches
/// the outer effect. The dependencies the outer run collected so far survive
/// the inner first run.
fn isolated_effect(f: impl FnMut() + 'static) -> impl FnOnce() {
    let _outer = OuterRun::suspend();
    effect_sync(f)
}

/// Re-run of a bound component after a dependency changed.
///
/// Returns the node now holding the position, or `None` when the position is
/// gone or the render failed.
fn replay(derived: &VirtualElement, anchor: &WeakHostNode, component: &str) -> Option<HostNode> {
    let Some(current) = anchor.upgrade() else {
        trace!(component, "replay skipped, node dropped");
        return None;
    };
    let Some(parent) = current.parent() else {
        trace!(component, node = %current.id(), "replay skipped, node detached");
        return None;
    };

    debug!(component, node = %current.id(), "replaying component");

    // Held aside so a replacement of `current` does not dispose it
    let own = current.take_subscription();

    match reconcile(derived, Some(current.clone()), &parent, false) {
        Ok(node) => {
            if let Some(own) = own {
                if let Some(stale) = node.set_subscription(own) {
                    stale.dispose();
                }
            }
            Some(node)
        }
        Err(err) => {
            error!(component, node = %current.id(), error = %err, "component replay failed");
            if let Some(own) = own {
                if let Some(stale) = current.set_subscription(own) {
                    stale.dispose();
                }
            }
            None
        }
    }
}

/// Invoke `component`, following component chains down to a non-component
/// element. Signal reads made here are tracked by the running effect.
fn resolve(component: &Component, props: &Props) -> VirtualElement {
    let mut element = component.render(props);
    while let Some(node) = element.as_node() {
        let ElementType::Component(inner) = node.kind() else { break };
        element = inner.render(node.props());
    }
    element
}

// =============================================================================
// Tests
// =============================================================================
