//! Painting a laid-out tree into a [`Buffer`].
//!
//! Elements are painted in (layer, tree order), each clipped to the
//! viewports of its clipping ancestors.

use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element, Overflow, Text, TextAlign};
use crate::layout::{LayoutResult, Rect};
use crate::style::Rgb;
use crate::text::{char_columns, columns, fit};

const TRACK: (char, Rgb) = ('░', Rgb::gray(60));
const THUMB: (char, Rgb) = ('█', Rgb::gray(150));

struct Paint<'a> {
    element: &'a Element,
    layer: i16,
    order: usize,
    clip: Option<Rect>,
}

pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let mut queue = Vec::new();
    collect(root, layout, root.frame.layer, None, &mut queue);
    queue.sort_by_key(|p| (p.layer, p.order));

    log::trace!("render: {} elements", queue.len());

    for paint in queue {
        paint_element(paint.element, layout, paint.clip, buf);
    }
}

/// Flatten the tree in order. A child's layer is at least its parent's.
fn collect<'a>(
    el: &'a Element,
    layout: &LayoutResult,
    parent_layer: i16,
    clip: Option<Rect>,
    queue: &mut Vec<Paint<'a>>,
) {
    let layer = el.frame.layer.max(parent_layer);
    queue.push(Paint {
        element: el,
        layer,
        order: queue.len(),
        clip,
    });

    let inner_clip = match layout.get(&el.id) {
        Some(rect) if el.scroll.clips() => Some(clip_to(viewport(el, *rect, layout), clip)),
        _ => clip,
    };
    for child in el.child_elements() {
        collect(child, layout, layer, inner_clip, queue);
    }
}

/// Padded area of a clipping element minus its scrollbar lines.
fn viewport(el: &Element, rect: Rect, layout: &LayoutResult) -> Rect {
    let inner = rect.inset(el.frame.padding);
    match layout.viewport_size(&el.id) {
        Some((width, height)) => Rect::new(inner.x, inner.y, width, height),
        None => inner,
    }
}

fn clip_to(rect: Rect, clip: Option<Rect>) -> Rect {
    clip.map_or(rect, |c| rect.intersect(c))
}

fn visible(clip: Option<Rect>, x: i32, y: i32) -> bool {
    clip.is_none_or(|c| c.contains(x, y))
}

fn paint_element(el: &Element, layout: &LayoutResult, clip: Option<Rect>, buf: &mut Buffer) {
    let Some(&rect) = layout.get(&el.id) else {
        return;
    };
    let shown = clip_to(rect, clip);
    if shown.is_empty() {
        return;
    }

    if let Some(bg) = el.style.bg {
        for y in shown.y..shown.bottom() {
            for x in shown.x..shown.right() {
                if let Some(cell) = buf.get_mut(x, y) {
                    *cell = Cell::blank(cell.fg, bg);
                }
            }
        }
    }

    if let Content::Text(text) = &el.content {
        paint_text(el, text, rect.inset(el.frame.padding), clip, buf);
    }

    if el.scroll.clips() {
        paint_scrollbars(el, rect, layout, clip, buf);
    }
}

fn paint_text(el: &Element, text: &Text, area: Rect, clip: Option<Rect>, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let fg = el.style.fg.unwrap_or(Rgb::WHITE);

    let lines = text.body.lines().take(if text.ellipsis { 1 } else { usize::MAX });
    for (y, line) in (area.y..area.bottom()).zip(lines) {
        let line = if text.ellipsis { fit(line, area.width) } else { line.into() };
        let mut x = area.x;
        if text.align == TextAlign::Center {
            x += i32::from(area.width.saturating_sub(columns(&line)) / 2);
        }

        for ch in line.chars() {
            let w = i32::from(char_columns(ch));
            if w == 0 {
                continue;
            }
            if x + w > area.right() {
                break;
            }
            for dx in 0..w {
                if !visible(clip, x + dx, y) {
                    continue;
                }
                // Text without a background shows the one underneath
                let bg = el
                    .style
                    .bg
                    .unwrap_or_else(|| buf.get(x + dx, y).map_or(Rgb::BLACK, |c| c.bg));
                buf.set(
                    x + dx,
                    y,
                    Cell {
                        ch: if dx == 0 { ch } else { ' ' },
                        fg,
                        bg,
                        bold: el.style.bold,
                        continuation: dx > 0,
                    },
                );
            }
            x += w;
        }
    }
}

/// `Scroll` always draws the bar for its axis, `Auto` only on overflow.
fn paint_scrollbars(el: &Element, rect: Rect, layout: &LayoutResult, clip: Option<Rect>, buf: &mut Buffer) {
    let (Some(content), Some(view)) = (layout.content_size(&el.id), layout.viewport_size(&el.id)) else {
        return;
    };
    let shows = |overflow: Overflow, content: u16, view: u16| match overflow {
        Overflow::Scroll => true,
        Overflow::Auto => content > view,
        _ => false,
    };
    let inner = rect.inset(el.frame.padding);

    if shows(el.scroll.x, content.0, view.0) && inner.height > 0 {
        let y = inner.bottom() - 1;
        let thumb = thumb(view.0, content.0, el.scroll.offset.0);
        for i in 0..view.0 {
            paint_track(buf, clip, inner.x + i32::from(i), y, thumb.contains(&i));
        }
    }

    if shows(el.scroll.y, content.1, view.1) && inner.width > 0 {
        let x = inner.right() - 1;
        let thumb = thumb(view.1, content.1, el.scroll.offset.1);
        for i in 0..view.1 {
            paint_track(buf, clip, x, inner.y + i32::from(i), thumb.contains(&i));
        }
    }
}

/// Track positions covered by the thumb on a track `view` cells long.
fn thumb(view: u16, content: u16, offset: u16) -> std::ops::Range<u16> {
    let (view32, content32) = (u32::from(view), u32::from(content));
    let size = if content == 0 {
        view
    } else {
        (view32 * view32 / content32).clamp(1, view32.max(1)) as u16
    };

    let max_offset = content32.saturating_sub(view32);
    let travel = u32::from(view.saturating_sub(size));
    let start = if max_offset == 0 || travel == 0 {
        0
    } else {
        (u32::from(offset).min(max_offset) * travel / max_offset) as u16
    };
    start..start + size
}

fn paint_track(buf: &mut Buffer, clip: Option<Rect>, x: i32, y: i32, on_thumb: bool) {
    if !visible(clip, x, y) {
        return;
    }
    let (ch, fg) = if on_thumb { THUMB } else { TRACK };
    if let Some(cell) = buf.get_mut(x, y) {
        cell.ch = ch;
        cell.fg = fg;
        cell.continuation = false;
    }
}

#[cfg(test)]
mod tests {
    use super::thumb;

    #[test]
    fn thumb_scales_with_visible_fraction() {
        assert_eq!(thumb(10, 18, 0), 0..5);
        assert_eq!(thumb(10, 18, 8), 5..10);
        assert_eq!(thumb(10, 18, 100), 5..10);
        assert_eq!(thumb(10, 5, 0), 0..10);
    }
}
