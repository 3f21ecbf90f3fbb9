//! Event delivery and bubbling propagation.
//!
//! This module provides the two delivery primitives the screen builds its
//! routing on:
//!
//! - [`deliver_direct`] - send an event to exactly one widget
//! - [`deliver_bubbling`] - send an event to a widget and walk toward the
//!   root until a handler accepts it
//!
//! # Liveness
//!
//! Handlers can mutate the tree while an event is in flight, so neither
//! primitive holds references across a handler call. Bubbling snapshots the
//! ancestor chain up front and revalidates each widget just before its
//! handler runs; a widget removed mid-flight is skipped silently.

use casement_core::{WidgetId, WidgetTree};

use crate::event::WidgetEvent;
use crate::widget::{BehaviorMap, EventCtx, ScreenAction};

/// Send an event to exactly one widget, with no propagation.
///
/// Returns `true` if the widget exists, has a behavior, and its handler
/// accepted the event. A missing widget or behavior is not an error; the
/// event is simply unhandled.
pub(crate) fn deliver_direct(
    tree: &mut WidgetTree,
    behaviors: &mut BehaviorMap,
    actions: &mut Vec<ScreenAction>,
    target: WidgetId,
    event: &mut WidgetEvent,
) -> bool {
    let Some(abs) = tree.absolute_position(target) else {
        return false;
    };
    event.set_local(abs);
    let Some(behavior) = behaviors.get_mut(target) else {
        return false;
    };
    let mut ctx = EventCtx::new(tree, actions, target);
    behavior.event(&mut ctx, event)
}

/// Send an event to a widget, then to each ancestor in turn, stopping at
/// the first handler that accepts it.
///
/// The chain runs leaf to root and includes the root itself. Returns `true`
/// if any handler accepted the event.
pub(crate) fn deliver_bubbling(
    tree: &mut WidgetTree,
    behaviors: &mut BehaviorMap,
    actions: &mut Vec<ScreenAction>,
    target: WidgetId,
    event: &mut WidgetEvent,
) -> bool {
    let chain = tree.ancestor_chain(target);
    for id in chain {
        if deliver_direct(tree, behaviors, actions, id, event) {
            return true;
        }
    }
    false
}
