//! Tests for the scroll offset broadcaster.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use frozen_table::{HandleId, ScrollGroup, ScrollRole, ScrollSync, ScrollTarget, Viewport};

/// A viewport that runs a hook every time it is moved.
#[derive(Default)]
struct HookTarget {
    viewport: Viewport,
    jumps: Cell<usize>,
    hook: RefCell<Option<Box<dyn Fn()>>>,
}

impl HookTarget {
    fn on_jump(&self, hook: impl Fn() + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }
}

impl ScrollTarget for HookTarget {
    fn offset_x(&self) -> u16 {
        self.viewport.offset_x()
    }

    fn jump_to(&self, x: u16) {
        self.viewport.jump_to(x);
        self.jumps.set(self.jumps.get() + 1);
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook();
        }
    }
}

fn sources(sync: &ScrollSync, group: ScrollGroup, n: usize) -> Vec<(HandleId, Rc<Viewport>)> {
    (0..n)
        .map(|_| {
            let viewport = Rc::new(Viewport::new());
            let id = sync.register(group, &viewport, ScrollRole::Source);
            (id, viewport)
        })
        .collect()
}

// ============================================================================
// Broadcast
// ============================================================================

#[test]
fn test_broadcast_moves_every_peer() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 4);
    let (source, source_view) = &views[1];

    source_view.jump_to(50);
    let updated = sync.on_scroll(ScrollGroup::Primary, *source, 50);

    assert_eq!(updated, 3);
    for (_, view) in &views {
        assert_eq!(view.offset_x(), 50);
    }
}

#[test]
fn test_source_is_not_moved_by_its_own_broadcast() {
    let sync = ScrollSync::new();
    let source = Rc::new(HookTarget::default());
    let peer = Rc::new(Viewport::new());
    let source_id = sync.register(ScrollGroup::Primary, &source, ScrollRole::Source);
    sync.register(ScrollGroup::Primary, &peer, ScrollRole::Source);

    sync.on_scroll(ScrollGroup::Primary, source_id, 12);

    assert_eq!(source.jumps.get(), 0);
    assert_eq!(peer.offset_x(), 12);
}

#[test]
fn test_groups_are_not_cross_synchronized() {
    let sync = ScrollSync::new();
    let primary = sources(&sync, ScrollGroup::Primary, 2);
    let secondary = sources(&sync, ScrollGroup::Secondary, 2);

    sync.on_scroll(ScrollGroup::Primary, primary[0].0, 30);
    assert_eq!(primary[1].1.offset_x(), 30);
    assert_eq!(secondary[0].1.offset_x(), 0);
    assert_eq!(secondary[1].1.offset_x(), 0);

    sync.on_scroll(ScrollGroup::Secondary, secondary[1].0, 7);
    assert_eq!(secondary[0].1.offset_x(), 7);
    assert_eq!(primary[0].1.offset_x(), 0);
    assert_eq!(primary[1].1.offset_x(), 30);
}

#[test]
fn test_zero_or_one_handle_is_a_no_op() {
    let sync = ScrollSync::new();
    assert!(sync.is_empty(ScrollGroup::Primary));

    let views = sources(&sync, ScrollGroup::Primary, 1);
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, views[0].0, 9), 0);
    assert_eq!(sync.len(ScrollGroup::Primary), 1);
}

#[test]
fn test_unknown_source_is_ignored() {
    let sync = ScrollSync::new();
    let primary = sources(&sync, ScrollGroup::Primary, 2);
    let secondary = sources(&sync, ScrollGroup::Secondary, 1);

    // Registered, but in the other group
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, secondary[0].0, 5), 0);
    assert_eq!(primary[0].1.offset_x(), 0);
    assert_eq!(primary[1].1.offset_x(), 0);
}

// ============================================================================
// Roles
// ============================================================================

#[test]
fn test_receiver_follows_but_does_not_drive() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 2);
    let receiver = Rc::new(Viewport::new());
    let receiver_id = sync.register(ScrollGroup::Primary, &receiver, ScrollRole::Receiver);

    views[0].1.jump_to(20);
    sync.on_scroll(ScrollGroup::Primary, views[0].0, 20);
    assert_eq!(views[1].1.offset_x(), 20);
    assert_eq!(receiver.offset_x(), 20);

    receiver.jump_to(35);
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, receiver_id, 35), 0);
    assert_eq!(views[0].1.offset_x(), 20);
    assert_eq!(views[1].1.offset_x(), 20);
}

#[test]
fn test_set_role_promotes_receiver() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 1);
    let late = Rc::new(Viewport::new());
    let late_id = sync.register(ScrollGroup::Primary, &late, ScrollRole::Receiver);

    assert!(sync.set_role(ScrollGroup::Primary, late_id, ScrollRole::Source));
    assert_eq!(sync.role(ScrollGroup::Primary, late_id), Some(ScrollRole::Source));
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, late_id, 8), 1);
    assert_eq!(views[0].1.offset_x(), 8);
}

#[test]
fn test_receiver_jump_never_feeds_back() {
    let sync = Rc::new(ScrollSync::new());
    let source = Rc::new(Viewport::new());
    let source_id = sync.register(ScrollGroup::Primary, &source, ScrollRole::Source);

    // A target that reports its own movement as a user scroll
    let echo = Rc::new(HookTarget::default());
    let echo_id = sync.register(ScrollGroup::Primary, &echo, ScrollRole::Source);
    let weak_sync: Weak<ScrollSync> = Rc::downgrade(&sync);
    let weak_echo = Rc::downgrade(&echo);
    echo.on_jump(move || {
        if let (Some(sync), Some(echo)) = (weak_sync.upgrade(), weak_echo.upgrade()) {
            let echoed = sync.on_scroll(ScrollGroup::Primary, echo_id, echo.offset_x() + 1);
            assert_eq!(echoed, 0);
        }
    });

    assert_eq!(sync.on_scroll(ScrollGroup::Primary, source_id, 40), 1);
    assert_eq!(echo.jumps.get(), 1);
    assert_eq!(echo.offset_x(), 40);
    assert_eq!(source.offset_x(), 0);

    // The guard is released once the broadcast returns
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, source_id, 41), 1);
    assert_eq!(echo.jumps.get(), 2);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_unregister_peer_mid_broadcast() {
    let sync = Rc::new(ScrollSync::new());
    let source = Rc::new(Viewport::new());
    let source_id = sync.register(ScrollGroup::Primary, &source, ScrollRole::Source);

    let first = Rc::new(HookTarget::default());
    sync.register(ScrollGroup::Primary, &first, ScrollRole::Source);
    let second = Rc::new(Viewport::new());
    let second_id = sync.register(ScrollGroup::Primary, &second, ScrollRole::Source);
    let third = Rc::new(Viewport::new());
    sync.register(ScrollGroup::Primary, &third, ScrollRole::Source);

    // Unmounting `second` while `first` is being moved
    let weak_sync = Rc::downgrade(&sync);
    first.on_jump(move || {
        if let Some(sync) = weak_sync.upgrade() {
            sync.unregister(ScrollGroup::Primary, second_id);
        }
    });

    let updated = sync.on_scroll(ScrollGroup::Primary, source_id, 25);

    assert_eq!(updated, 2);
    assert_eq!(first.offset_x(), 25);
    assert_eq!(second.offset_x(), 0);
    assert_eq!(third.offset_x(), 25);
    assert_eq!(sync.len(ScrollGroup::Primary), 3);

    // The remaining group keeps working
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, source_id, 26), 2);
    assert_eq!(third.offset_x(), 26);
}

#[test]
fn test_unregister_self_mid_broadcast() {
    let sync = Rc::new(ScrollSync::new());
    let views = sources(&sync, ScrollGroup::Secondary, 1);
    let leaving = Rc::new(HookTarget::default());
    let leaving_id = sync.register(ScrollGroup::Secondary, &leaving, ScrollRole::Source);

    let weak_sync = Rc::downgrade(&sync);
    leaving.on_jump(move || {
        if let Some(sync) = weak_sync.upgrade() {
            sync.unregister(ScrollGroup::Secondary, leaving_id);
        }
    });

    assert_eq!(sync.on_scroll(ScrollGroup::Secondary, views[0].0, 3), 1);
    assert_eq!(sync.len(ScrollGroup::Secondary), 1);
}

#[test]
fn test_unregister_twice_is_a_no_op() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 1);

    assert!(sync.unregister(ScrollGroup::Primary, views[0].0));
    assert!(!sync.unregister(ScrollGroup::Primary, views[0].0));
    assert!(sync.is_empty(ScrollGroup::Primary));
}

#[test]
fn test_stale_handle_is_skipped_and_pruned() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 2);
    let dropped = Rc::new(Viewport::new());
    let dropped_id = sync.register(ScrollGroup::Primary, &dropped, ScrollRole::Source);
    drop(dropped);

    assert_eq!(sync.len(ScrollGroup::Primary), 2);
    assert_eq!(sync.on_scroll(ScrollGroup::Primary, views[0].0, 11), 1);
    assert_eq!(views[1].1.offset_x(), 11);

    // Pruned during the broadcast
    assert!(!sync.unregister(ScrollGroup::Primary, dropped_id));
}

#[test]
fn test_single_live_handle_with_stale_peer_is_a_no_op() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 1);
    let dropped = Rc::new(Viewport::new());
    let dropped_id = sync.register(ScrollGroup::Primary, &dropped, ScrollRole::Source);
    drop(dropped);

    assert_eq!(sync.on_scroll(ScrollGroup::Primary, views[0].0, 6), 0);
    assert_eq!(views[0].1.offset_x(), 0);
    assert_eq!(sync.last_offset(ScrollGroup::Primary), Some(6));

    // Returned before walking peers, so the stale entry is still there
    assert!(sync.unregister(ScrollGroup::Primary, dropped_id));
}

#[test]
fn test_late_registration_adopts_last_offset() {
    let sync = ScrollSync::new();
    let views = sources(&sync, ScrollGroup::Primary, 2);
    sync.on_scroll(ScrollGroup::Primary, views[0].0, 18);
    assert_eq!(sync.last_offset(ScrollGroup::Primary), Some(18));

    let late = Rc::new(Viewport::new());
    sync.register(ScrollGroup::Primary, &late, ScrollRole::Receiver);
    assert_eq!(late.offset_x(), 18);

    // Nothing has been broadcast in the other group yet
    let other = Rc::new(Viewport::new());
    sync.register(ScrollGroup::Secondary, &other, ScrollRole::Source);
    assert_eq!(other.offset_x(), 0);
}
