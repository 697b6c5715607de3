use celldom::{Element, Insets, LayoutResult, Length, Overflow, Rect};

fn layout_root(root: &Element, width: u16, height: u16) -> LayoutResult {
    celldom::layout::layout(root, Rect::new(0, 0, width, height))
}

fn cells(prefix: &str, count: usize, width: u16) -> Vec<Element> {
    (0..count)
        .map(|i| {
            Element::text(format!("{prefix}{i}"))
                .id(format!("{prefix}{i}"))
                .width(Length::Cells(width))
                .height(Length::Cells(1))
        })
        .collect()
}

// ============================================================================
// Box Model
// ============================================================================

#[test]
fn test_margin_top_left() {
    let root = Element::spacer()
        .id("root")
        .width(Length::Cells(50))
        .height(Length::Cells(50))
        .margin(Insets::new(5, 0, 0, 10));

    let layout = layout_root(&root, 100, 100);
    let rect = layout.get("root").unwrap();

    assert_eq!(rect.x, 10, "margin left");
    assert_eq!(rect.y, 5, "margin top");
    assert_eq!(rect.width, 50);
    assert_eq!(rect.height, 50);
}

#[test]
fn test_fill_takes_remaining_row_space() {
    let root = Element::row()
        .id("root")
        .width(Length::Cells(30))
        .height(Length::Cells(1))
        .child(Element::spacer().id("fixed").width(Length::Cells(10)))
        .child(Element::spacer().id("fill").width(Length::Fill));

    let layout = layout_root(&root, 100, 10);

    assert_eq!(layout.get("fixed").unwrap().width, 10);
    let fill = layout.get("fill").unwrap();
    assert_eq!(fill.x, 10);
    assert_eq!(fill.width, 20);
}

#[test]
fn test_fill_child_margin_is_taken_from_its_share() {
    let root = Element::row()
        .id("root")
        .width(Length::Cells(30))
        .height(Length::Cells(1))
        .child(Element::spacer().id("fill").width(Length::Fill).margin(Insets::left(4)));

    let layout = layout_root(&root, 100, 10);
    let fill = layout.get("fill").unwrap();

    assert_eq!(fill.x, 4);
    assert_eq!(fill.width, 26);
}

#[test]
fn test_stretch_gives_children_full_cross_size() {
    let root = Element::column()
        .id("root")
        .width(Length::Cells(40))
        .height(Length::Cells(10))
        .stretch()
        .child(Element::text("short").id("a"));

    let layout = layout_root(&root, 100, 100);
    assert_eq!(layout.get("a").unwrap().width, 40);
}

#[test]
fn test_auto_height_sums_column_children() {
    let root = Element::column()
        .id("root")
        .child(Element::text("one").id("a"))
        .child(Element::text("two\nlines").id("b"));

    let layout = layout_root(&root, 20, 20);
    assert_eq!(layout.get("root").unwrap().height, 3);
    assert_eq!(layout.get("b").unwrap().y, 1);
}

// ============================================================================
// Pinned Children
// ============================================================================

#[test]
fn test_pinned_child_is_relative_to_parent() {
    let root = Element::column()
        .id("root")
        .width(Length::Cells(30))
        .height(Length::Cells(5))
        .child(
            Element::row()
                .id("parent")
                .width(Length::Fill)
                .height(Length::Cells(1))
                .margin(Insets::top(3))
                .child(
                    Element::text("Details")
                        .id("abs")
                        .pinned(2, 0)
                        .width(Length::Cells(8)),
                ),
        );

    let layout = layout_root(&root, 30, 5);
    let abs = layout.get("abs").unwrap();

    assert_eq!((abs.x, abs.y), (2, 3));
    assert_eq!(abs.width, 8);
}

#[test]
fn test_pinned_child_does_not_take_flow_space() {
    let root = Element::row()
        .id("root")
        .width(Length::Cells(30))
        .height(Length::Cells(1))
        .child(
            Element::spacer()
                .id("abs")
                .pinned(0, 0)
                .width(Length::Cells(10)),
        )
        .child(Element::spacer().id("flow").width(Length::Cells(5)));

    let layout = layout_root(&root, 30, 1);
    assert_eq!(layout.get("flow").unwrap().x, 0);
}

// ============================================================================
// Scroll Containers
// ============================================================================

#[test]
fn test_horizontal_offset_shifts_children() {
    let root = Element::row()
        .id("vp")
        .width(Length::Cells(10))
        .height(Length::Cells(1))
        .scroll_x(Overflow::Hidden)
        .offset(4, 0)
        .children(cells("c", 3, 6));

    let layout = layout_root(&root, 40, 5);

    assert_eq!(layout.get("c0").unwrap().x, -4);
    assert_eq!(layout.get("c1").unwrap().x, 2);
    assert_eq!(layout.get("c2").unwrap().x, 8);
    assert_eq!(layout.content_size("vp"), Some((18, 1)));
    assert_eq!(layout.viewport_size("vp"), Some((10, 1)));
    assert_eq!(layout.max_scroll_x("vp"), Some(8));
}

#[test]
fn test_offset_is_clamped_to_content() {
    let root = Element::row()
        .id("vp")
        .width(Length::Cells(10))
        .height(Length::Cells(1))
        .scroll_x(Overflow::Hidden)
        .offset(100, 0)
        .children(cells("c", 3, 6));

    let layout = layout_root(&root, 40, 5);

    // Last cell ends exactly at the right edge of the viewport
    assert_eq!(layout.get("c0").unwrap().x, -8);
    assert_eq!(layout.get("c2").unwrap().right(), 10);
}

#[test]
fn test_permanent_scrollbar_reserves_a_line() {
    let root = Element::row()
        .id("vp")
        .width(Length::Cells(10))
        .scroll_x(Overflow::Scroll)
        .children(cells("c", 3, 6));

    let layout = layout_root(&root, 40, 5);

    assert_eq!(layout.get("vp").unwrap().height, 2);
    assert_eq!(layout.viewport_size("vp"), Some((10, 1)));
}

#[test]
fn test_vertical_scroll_moves_rows_above_origin() {
    let root = Element::column()
        .id("list")
        .width(Length::Cells(10))
        .height(Length::Cells(2))
        .scroll_y(Overflow::Hidden)
        .offset(0, 1)
        .children(cells("r", 4, 10));

    let layout = layout_root(&root, 10, 2);

    assert_eq!(layout.get("r0").unwrap().y, -1);
    assert_eq!(layout.get("r1").unwrap().y, 0);
    assert_eq!(layout.max_scroll_y("list"), Some(2));
}
