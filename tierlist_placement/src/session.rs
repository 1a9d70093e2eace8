// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag gesture state machine.
//!
//! A session is idle until a row or item is pressed. A pointer press arms a
//! pending drag that only activates once the pointer has travelled past the
//! activation distance, so plain clicks never become drags. A keyboard drag
//! activates immediately. While dragging, pointer moves run collision
//! detection and arrow keys run lane navigation; both record the hover
//! target. Dropping resolves the active element and hover target into a
//! [`Command`] and always returns the session to idle.
//!
//! ```text
//! Idle --press--> Pending --move past threshold--> Dragging --drop/cancel--> Idle
//! Idle --start_keyboard-----------------------> Dragging
//! ```

use core::mem;

use kurbo::{Point, Rect};
use tierlist_focus::{LanePolicy, NavOrigin, NavSpace, NavTarget, Navigation, NavigationPolicy};
use tierlist_hit::{CollisionFilter, DragKind, HitQuery, ZoneIndex};
use tierlist_store::{Command, TierList};
use tracing::{debug, trace};

use crate::resolve::resolve;
use crate::target::DragTarget;

/// Pointer travel, in pixels, before a press becomes a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

/// Session tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Pointer travel required to start a pointer drag.
    pub activation_distance: f64,
    /// Hit-testing policy for pointer drags.
    pub collision: CollisionFilter,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            collision: CollisionFilter::default(),
        }
    }
}

/// How a drag is being driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragInput {
    /// Pointer (mouse, touch, pen).
    Pointer,
    /// Arrow keys.
    Keyboard,
}

/// An activated drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveDrag {
    /// The dragged row or item.
    pub active: DragTarget,
    /// Which resolution path applies.
    pub kind: DragKind,
    /// What drives the drag.
    pub input: DragInput,
    /// Current hover target.
    pub over: Option<DragTarget>,
    /// Current bounds of the dragged element.
    pub rect: Rect,
}

/// Where a session is in the gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No gesture.
    #[default]
    Idle,
    /// Pressed, waiting for the pointer to travel far enough.
    Pending {
        /// Pressed element.
        target: DragTarget,
        /// Press position.
        origin: Point,
    },
    /// Dragging.
    Dragging(ActiveDrag),
}

/// One drag-and-drop interaction at a time.
///
/// Sessions are ephemeral UI state and are never persisted.
#[derive(Clone, Debug, Default)]
pub struct DragSession<P = LanePolicy> {
    config: SessionConfig,
    policy: P,
    state: DragState,
}

impl DragSession {
    /// A session with the default configuration and lane navigation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session with the given configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            policy: LanePolicy,
            state: DragState::Idle,
        }
    }
}

impl<P: NavigationPolicy<DragTarget>> DragSession<P> {
    /// A session using a custom navigation policy.
    pub fn with_policy(config: SessionConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            state: DragState::Idle,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The dragged element, once the drag is active.
    pub fn active(&self) -> Option<DragTarget> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.active),
            _ => None,
        }
    }

    /// The current hover target.
    pub fn over(&self) -> Option<DragTarget> {
        match self.state {
            DragState::Dragging(drag) => drag.over,
            _ => None,
        }
    }

    /// Press on `target` at `point`. Returns whether a drag was armed.
    ///
    /// Only rows and items can be dragged, and only from idle.
    pub fn press(&mut self, target: DragTarget, point: Point) -> bool {
        if !matches!(self.state, DragState::Idle) || target.drag_kind().is_none() {
            return false;
        }
        self.state = DragState::Pending {
            target,
            origin: point,
        };
        true
    }

    /// Start a keyboard drag of `target`, whose bounds are `rect`.
    ///
    /// The element starts out hovering itself, so dropping right away changes
    /// nothing. Replaces a pending pointer press.
    pub fn start_keyboard(&mut self, target: DragTarget, rect: Rect) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(kind) = target.drag_kind() else {
            return false;
        };
        debug!(%target, "keyboard drag started");
        self.state = DragState::Dragging(ActiveDrag {
            active: target,
            kind,
            input: DragInput::Keyboard,
            over: Some(target),
            rect,
        });
        true
    }

    /// Feed a pointer move. `rect` is where the dragged element is drawn now.
    ///
    /// Activates a pending drag once past the activation distance, then runs
    /// collision detection. Returns the hover target. Keyboard drags ignore
    /// the pointer.
    pub fn pointer_move(
        &mut self,
        point: Point,
        rect: Rect,
        zones: &ZoneIndex<DragTarget>,
    ) -> Option<DragTarget> {
        if let DragState::Pending { target, origin } = self.state {
            if point.distance(origin) <= self.config.activation_distance {
                return None;
            }
            let kind = target.drag_kind()?;
            debug!(%target, "pointer drag started");
            self.state = DragState::Dragging(ActiveDrag {
                active: target,
                kind,
                input: DragInput::Pointer,
                over: None,
                rect,
            });
        }

        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        if drag.input != DragInput::Pointer {
            return drag.over;
        }
        let hits = self
            .config
            .collision
            .detect(zones, &HitQuery::pointer(point, rect), drag.kind);
        let over = hits.first().map(|hit| hit.id);
        if over != drag.over {
            trace!(active = %drag.active, ?over, "hover changed");
        }
        drag.over = over;
        drag.rect = rect;
        over
    }

    /// Move a keyboard drag one step in `direction`.
    ///
    /// Returns where the dragged element should be drawn next. Rows cannot
    /// be moved with the keyboard navigator, so row drags return `None`.
    pub fn keyboard_move(
        &mut self,
        direction: Navigation,
        zones: &ZoneIndex<DragTarget>,
    ) -> Option<NavTarget<DragTarget>> {
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        if drag.kind == DragKind::Row {
            trace!(active = %drag.active, "row drags do not navigate");
            return None;
        }
        let origin = NavOrigin {
            rect: drag.rect,
            active: Some(drag.active),
            over: drag.over,
        };
        let target = self
            .policy
            .next(&origin, direction, &NavSpace::new(zones.zones()))?;
        drag.over = Some(target.id);
        drag.rect = drag.rect.with_origin(target.anchor);
        Some(target)
    }

    /// Finish the gesture against `list`. Always returns to idle.
    pub fn drop(&mut self, list: &TierList) -> Option<Command> {
        match mem::take(&mut self.state) {
            DragState::Dragging(drag) => resolve(drag.active, drag.over, list),
            DragState::Pending { .. } | DragState::Idle => None,
        }
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        if let DragState::Dragging(drag) = mem::take(&mut self.state) {
            debug!(active = %drag.active, "drag cancelled");
        }
    }
}
