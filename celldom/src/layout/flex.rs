use super::{LayoutResult, Rect};
use crate::element::{Content, Element, Flow, Length, Overflow, Placement};
use crate::text::columns;

pub fn layout(root: &Element, area: Rect) -> LayoutResult {
    let mut out = LayoutResult::new();
    place(root, area, &mut out);
    out
}

/// Size `el` inside `slot` and lay out its subtree.
fn place(el: &Element, slot: Rect, out: &mut LayoutResult) {
    let rect = match el.frame.placement {
        Placement::Pinned { left, top } => Rect::new(
            slot.x + i32::from(left),
            slot.y + i32::from(top),
            resolve(el, true, slot.width),
            resolve(el, false, slot.height),
        ),
        Placement::Flow => {
            let room = slot.inset(el.frame.margin);
            Rect::new(
                room.x,
                room.y,
                resolve(el, true, room.width),
                resolve(el, false, room.height),
            )
        }
    };
    out.insert(el.id.clone(), rect);
    arrange(el, rect, out);
}

fn resolve(el: &Element, horizontal: bool, room: u16) -> u16 {
    let size = match el.frame.length(horizontal) {
        Length::Cells(n) => n,
        Length::Fill => room,
        Length::Auto => natural(el, horizontal),
    };
    size.min(room)
}

/// Position the children of `el`, which occupies `rect`.
fn arrange(el: &Element, rect: Rect, out: &mut LayoutResult) {
    let frame = scroll_frame(el, rect.inset(el.frame.padding), out);
    let children = el.child_elements();
    if children.is_empty() {
        return;
    }

    let horizontal = el.frame.flow == Flow::Row;
    let main_room = frame.extent(horizontal);
    let cross_room = frame.extent(!horizontal);
    let in_flow = || children.iter().filter(|c| !c.is_pinned());

    let fills = in_flow()
        .filter(|c| c.frame.length(horizontal) == Length::Fill)
        .count() as u16;
    let claimed: u16 = in_flow()
        .filter(|c| c.frame.length(horizontal) != Length::Fill)
        .map(|c| outer(c, horizontal))
        .sum();
    let share = main_room.saturating_sub(claimed).checked_div(fills).unwrap_or(0);

    let mut cursor = 0u16;
    for child in in_flow() {
        let (lead, trail) = child.frame.margin.ends(horizontal);
        let main = match child.frame.length(horizontal) {
            Length::Cells(n) => n,
            Length::Auto => natural(child, horizontal),
            Length::Fill => share.saturating_sub(lead + trail),
        };

        let (cross_lead, cross_trail) = child.frame.margin.ends(!horizontal);
        let cross_fit = cross_room.saturating_sub(cross_lead + cross_trail);
        let cross = match child.frame.length(!horizontal) {
            Length::Cells(n) => n,
            Length::Fill => cross_fit,
            Length::Auto if el.frame.stretch => cross_fit,
            Length::Auto => natural(child, !horizontal),
        };

        // Children past the end of a non-scrolling parent are cut short
        let shown = main.min(main_room.saturating_sub(cursor + lead));
        let main_at = frame.start(horizontal) + i32::from(cursor + lead);
        let cross_at = frame.start(!horizontal) + i32::from(cross_lead);
        let child_rect = if horizontal {
            Rect::new(main_at, cross_at, shown, cross.min(cross_fit))
        } else {
            Rect::new(cross_at, main_at, cross.min(cross_fit), shown)
        };

        out.insert(child.id.clone(), child_rect);
        arrange(child, child_rect, out);
        cursor = cursor.saturating_add(lead + main + trail);
    }

    for child in children.iter().filter(|c| c.is_pinned()) {
        place(child, rect, out);
    }
}

/// The area children are laid out in. A scroll container gets its full
/// content extent, shifted back by the clamped offset; everything else
/// gets its padded rect.
fn scroll_frame(el: &Element, inner: Rect, out: &mut LayoutResult) -> Rect {
    let scroll = &el.scroll;
    if !scroll.clips() {
        return inner;
    }

    let content = (content_extent(el, true), content_extent(el, false));
    let bar_below = match scroll.x {
        Overflow::Scroll => 1,
        Overflow::Auto if content.0 > inner.width => 1,
        _ => 0,
    };
    let bar_right = match scroll.y {
        Overflow::Scroll => 1,
        Overflow::Auto if content.1 > inner.height.saturating_sub(bar_below) => 1,
        _ => 0,
    };
    let view = (
        inner.width.saturating_sub(bar_right),
        inner.height.saturating_sub(bar_below),
    );
    out.insert_scroll_sizes(&el.id, content, view);

    let axis = |horizontal: bool, content: u16, view: u16, offset: u16| {
        if scroll.axis(horizontal).clips() {
            (offset.min(content.saturating_sub(view)), view.max(content))
        } else {
            (0, view)
        }
    };
    let (dx, width) = axis(true, content.0, view.0, scroll.offset.0);
    let (dy, height) = axis(false, content.1, view.1, scroll.offset.1);

    Rect::new(inner.x - i32::from(dx), inner.y - i32::from(dy), width, height)
}

/// Size an auto-sized element asks for along one axis.
fn natural(el: &Element, horizontal: bool) -> u16 {
    // A permanent scrollbar takes a line across the other axis
    let bar = u16::from(el.scroll.axis(!horizontal) == Overflow::Scroll);
    content_extent(el, horizontal) + el.frame.padding.along(horizontal) + bar
}

/// Size of what `el` holds along one axis, ignoring pinned children.
fn content_extent(el: &Element, horizontal: bool) -> u16 {
    match &el.content {
        Content::Empty => 0,
        Content::Text(text) if horizontal => text.body.lines().map(columns).max().unwrap_or(0),
        Content::Text(text) if text.ellipsis => 1,
        Content::Text(text) => text.body.lines().count().max(1) as u16,
        Content::Children(children) => {
            let sizes = children
                .iter()
                .filter(|c| !c.is_pinned())
                .map(|c| outer(c, horizontal));
            if (el.frame.flow == Flow::Row) == horizontal {
                sizes.sum()
            } else {
                sizes.max().unwrap_or(0)
            }
        }
    }
}

/// Extent of a child including its margins, as its parent sees it.
fn outer(child: &Element, horizontal: bool) -> u16 {
    let size = match child.frame.length(horizontal) {
        Length::Cells(n) => n,
        _ => natural(child, horizontal),
    };
    size + child.frame.margin.along(horizontal)
}
