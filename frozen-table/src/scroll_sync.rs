//! Horizontal scroll offset broadcasting between viewports.
//!
//! Viewports join a [`ScrollGroup`] and are addressed by the [`HandleId`]
//! returned at registration. When a source viewport reports a new offset,
//! every other live viewport in the same group jumps to it. Receivers are
//! moved with [`ScrollTarget::jump_to`], which never reports back, so a
//! broadcast cannot feed itself.
//!
//! The coordinator only keeps weak references. A viewport dropped without
//! being unregistered is skipped and forgotten the next time its group
//! broadcasts.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

/// An independent set of viewports kept at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollGroup {
    /// Row value regions and accordion text.
    Primary,
    /// List-detail sub-rows.
    Secondary,
}

impl fmt::Display for ScrollGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollGroup::Primary => write!(f, "primary"),
            ScrollGroup::Secondary => write!(f, "secondary"),
        }
    }
}

/// Whether a viewport's own scrolling propagates to its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRole {
    Source,
    /// Follows the group but never drives it.
    Receiver,
}

/// Token for a registered viewport. Never reused by the same coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle-{}", self.0)
    }
}

/// Something with a horizontal offset that can be moved imperatively.
pub trait ScrollTarget {
    fn offset_x(&self) -> u16;

    /// Move to `x` instantly. Must not emit a scroll notification.
    fn jump_to(&self, x: u16);
}

/// A plain horizontal viewport offset, optionally bounded by its content.
#[derive(Debug, Default)]
pub struct Viewport {
    offset: Cell<u16>,
    max_offset: Cell<Option<u16>>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the offset to `max` (content width minus viewport width).
    /// The current offset is clamped immediately.
    pub fn set_max_offset(&self, max: Option<u16>) {
        self.max_offset.set(max);
        if let Some(max) = max
            && self.offset.get() > max
        {
            self.offset.set(max);
        }
    }

    pub fn max_offset(&self) -> Option<u16> {
        self.max_offset.get()
    }
}

impl ScrollTarget for Viewport {
    fn offset_x(&self) -> u16 {
        self.offset.get()
    }

    fn jump_to(&self, x: u16) {
        let x = self.max_offset.get().map_or(x, |max| x.min(max));
        self.offset.set(x);
    }
}

struct Registration {
    target: Weak<dyn ScrollTarget>,
    role: ScrollRole,
}

#[derive(Default)]
struct GroupState {
    handles: BTreeMap<HandleId, Registration>,
    last_offset: Option<u16>,
    broadcasting: bool,
}

impl GroupState {
    /// Registrations whose owner has not been dropped yet.
    fn live(&self) -> usize {
        self.handles
            .values()
            .filter(|r| r.target.strong_count() > 0)
            .count()
    }
}

/// Clears the in-flight flag even if a target panics mid-broadcast.
struct BroadcastGuard<'a> {
    sync: &'a ScrollSync,
    group: ScrollGroup,
}

impl Drop for BroadcastGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.sync.groups.borrow_mut().get_mut(&self.group) {
            state.broadcasting = false;
        }
    }
}

/// Registry of viewports by group, and the broadcaster between them.
///
/// All methods take `&self` so that a target may unregister itself, or a
/// peer, from inside [`ScrollTarget::jump_to`] while a broadcast is running.
#[derive(Default)]
pub struct ScrollSync {
    next_id: Cell<u64>,
    groups: RefCell<HashMap<ScrollGroup, GroupState>>,
}

impl fmt::Debug for ScrollSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.groups.borrow();
        let mut dbg = f.debug_struct("ScrollSync");
        for (group, state) in groups.iter() {
            dbg.field(&group.to_string(), &state.handles.len());
        }
        dbg.finish()
    }
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a viewport to `group`.
    ///
    /// If the group has already broadcast an offset, the new viewport is
    /// moved there so it mounts aligned with its peers.
    pub fn register<T: ScrollTarget + 'static>(
        &self,
        group: ScrollGroup,
        target: &Rc<T>,
        role: ScrollRole,
    ) -> HandleId {
        let id = HandleId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let shared: Rc<dyn ScrollTarget> = target.clone();
        let last_offset = {
            let mut groups = self.groups.borrow_mut();
            let state = groups.entry(group).or_default();
            state.handles.insert(
                id,
                Registration {
                    target: Rc::downgrade(&shared),
                    role,
                },
            );
            state.last_offset
        };

        debug!("scroll sync: registered {id} in {group} as {role:?}");

        if let Some(x) = last_offset
            && shared.offset_x() != x
        {
            shared.jump_to(x);
        }

        id
    }

    /// Remove a viewport. Returns false if it was not registered, which is
    /// not an error: unmount may race a broadcast that already dropped it.
    pub fn unregister(&self, group: ScrollGroup, id: HandleId) -> bool {
        let removed = self
            .groups
            .borrow_mut()
            .get_mut(&group)
            .and_then(|state| state.handles.remove(&id))
            .is_some();
        if removed {
            debug!("scroll sync: unregistered {id} from {group}");
        } else {
            trace!("scroll sync: {id} already gone from {group}");
        }
        removed
    }

    /// Change whether a registered viewport drives its group.
    pub fn set_role(&self, group: ScrollGroup, id: HandleId, role: ScrollRole) -> bool {
        let mut groups = self.groups.borrow_mut();
        match groups
            .get_mut(&group)
            .and_then(|state| state.handles.get_mut(&id))
        {
            Some(registration) => {
                registration.role = role;
                debug!("scroll sync: {id} in {group} is now {role:?}");
                true
            }
            None => false,
        }
    }

    pub fn role(&self, group: ScrollGroup, id: HandleId) -> Option<ScrollRole> {
        self.groups
            .borrow()
            .get(&group)
            .and_then(|state| state.handles.get(&id))
            .map(|registration| registration.role)
    }

    /// Offset most recently broadcast in `group`.
    pub fn last_offset(&self, group: ScrollGroup) -> Option<u16> {
        self.groups
            .borrow()
            .get(&group)
            .and_then(|state| state.last_offset)
    }

    /// Number of registered viewports whose owner is still alive.
    pub fn len(&self, group: ScrollGroup) -> usize {
        self.groups.borrow().get(&group).map_or(0, GroupState::live)
    }

    pub fn is_empty(&self, group: ScrollGroup) -> bool {
        self.len(group) == 0
    }

    /// Propagate a new offset produced on `source` to every other viewport in
    /// `group`. Returns how many viewports were moved.
    ///
    /// Nothing happens when the source is unknown or a receiver, when it has
    /// no peers, or when a broadcast for this group is already running.
    pub fn on_scroll(&self, group: ScrollGroup, source: HandleId, offset_x: u16) -> usize {
        let peers: Vec<HandleId> = {
            let mut groups = self.groups.borrow_mut();
            let Some(state) = groups.get_mut(&group) else {
                return 0;
            };
            if state.broadcasting {
                trace!("scroll sync: ignoring {source} while {group} is broadcasting");
                return 0;
            }
            match state.handles.get(&source) {
                None => {
                    trace!("scroll sync: {source} is not in {group}");
                    return 0;
                }
                Some(registration) if registration.role == ScrollRole::Receiver => {
                    trace!("scroll sync: {source} is receive-only");
                    return 0;
                }
                Some(_) => {}
            }

            state.last_offset = Some(offset_x);
            if state.live() <= 1 {
                return 0;
            }
            state.broadcasting = true;
            state
                .handles
                .keys()
                .filter(|id| **id != source)
                .copied()
                .collect()
        };

        let _guard = BroadcastGuard { sync: self, group };
        let mut updated = 0;

        for id in peers {
            // Re-resolve every peer: an earlier jump may have unregistered it
            let weak = self
                .groups
                .borrow()
                .get(&group)
                .and_then(|state| state.handles.get(&id))
                .map(|registration| registration.target.clone());
            let Some(weak) = weak else {
                trace!("scroll sync: {id} left {group} mid-broadcast");
                continue;
            };
            let Some(target) = weak.upgrade() else {
                warn!("scroll sync: dropping stale {id} from {group}");
                if let Some(state) = self.groups.borrow_mut().get_mut(&group) {
                    state.handles.remove(&id);
                }
                continue;
            };

            trace!("scroll sync: {group} {id} -> {offset_x}");
            target.jump_to(offset_x);
            updated += 1;
        }

        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_to_extent() {
        let viewport = Viewport::new();
        viewport.jump_to(40);
        viewport.set_max_offset(Some(25));
        assert_eq!(viewport.offset_x(), 25);
        viewport.jump_to(30);
        assert_eq!(viewport.offset_x(), 25);
        viewport.set_max_offset(None);
        viewport.jump_to(30);
        assert_eq!(viewport.offset_x(), 30);
    }

    #[test]
    fn handle_ids_are_not_reused() {
        let sync = ScrollSync::new();
        let viewport = Rc::new(Viewport::new());
        let a = sync.register(ScrollGroup::Primary, &viewport, ScrollRole::Source);
        sync.unregister(ScrollGroup::Primary, a);
        let b = sync.register(ScrollGroup::Primary, &viewport, ScrollRole::Source);
        assert_ne!(a, b);
    }
}
