use crate::element::Element;
use crate::layout::LayoutResult;

/// Id of the deepest clickable element at (x, y).
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    deepest(layout, root, (i32::from(x), i32::from(y)), &|e| e.clickable)
}

/// Id of the innermost scroll container at (x, y).
pub fn hit_test_scrollable(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    deepest(layout, root, (i32::from(x), i32::from(y)), &|e| {
        e.scroll.wheel || e.scroll.clips()
    })
}

fn deepest(
    layout: &LayoutResult,
    el: &Element,
    (x, y): (i32, i32),
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    // Children never extend a parent's hit area, so a cell scrolled out of
    // its viewport cannot be hit through a neighbour
    if !layout.get(&el.id)?.contains(x, y) {
        return None;
    }

    // Topmost first: higher layer, then later in the tree
    let mut children: Vec<&Element> = el.child_elements().iter().collect();
    children.sort_by_key(|c| c.frame.layer);
    children
        .into_iter()
        .rev()
        .find_map(|child| deepest(layout, child, (x, y), accept))
        .or_else(|| accept(el).then(|| el.id.clone()))
}
