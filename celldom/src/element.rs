//! The element tree.
//!
//! An [`Element`] is a box: an id, a [`Frame`] saying how it is sized and
//! placed, a [`Scroll`] saying what happens to content that does not fit, a
//! paint [`Style`], and either text or child elements. Trees are cheap and
//! rebuilt every frame; ids are what survives between frames.

use std::cell::Cell;
use std::collections::HashMap;

use crate::style::Style;

thread_local! {
    static ANONYMOUS: Cell<u64> = const { Cell::new(0) };
}

/// Ids for elements the caller never names. Layout is keyed by id, so every
/// element needs one.
fn anonymous_id() -> String {
    let n = ANONYMOUS.with(|next| {
        let n = next.get();
        next.set(n + 1);
        n
    });
    format!("_{n}")
}

/// Extent along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Length {
    /// As large as the content.
    #[default]
    Auto,
    /// Whatever the parent has left along its main axis, or all of the cross axis.
    Fill,
    Cells(u16),
}

/// Main axis children are stacked along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Column,
    Row,
}

/// How an element is positioned relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Flow,
    /// Out of the flow, offset from the parent's top-left corner.
    Pinned { left: i16, top: i16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    /// Clip, no scrollbar.
    Hidden,
    /// Clip and always draw a scrollbar.
    Scroll,
    /// Clip and draw a scrollbar while content overflows.
    Auto,
}

impl Overflow {
    pub const fn clips(self) -> bool {
        !matches!(self, Overflow::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Margin or padding widths, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Insets {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn left(n: u16) -> Self {
        Self::new(0, 0, 0, n)
    }

    pub const fn top(n: u16) -> Self {
        Self::new(n, 0, 0, 0)
    }

    /// Same width on the left and the right.
    pub const fn sides(n: u16) -> Self {
        Self::new(0, n, 0, n)
    }

    /// Total along the horizontal (`true`) or vertical axis.
    pub const fn along(&self, horizontal: bool) -> u16 {
        if horizontal {
            self.left + self.right
        } else {
            self.top + self.bottom
        }
    }

    /// Leading and trailing widths along one axis.
    pub const fn ends(&self, horizontal: bool) -> (u16, u16) {
        if horizontal {
            (self.left, self.right)
        } else {
            (self.top, self.bottom)
        }
    }
}

/// Sizing and placement of one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub width: Length,
    pub height: Length,
    pub margin: Insets,
    pub padding: Insets,
    pub flow: Flow,
    /// Auto-sized children take the full cross size instead of their content size.
    pub stretch: bool,
    pub placement: Placement,
    /// Paint and hit-test priority. Children never sit below their parent.
    pub layer: i16,
}

impl Frame {
    pub const fn length(&self, horizontal: bool) -> Length {
        if horizontal { self.width } else { self.height }
    }
}

/// Overflow behaviour and current offset of a scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scroll {
    pub x: Overflow,
    pub y: Overflow,
    pub offset: (u16, u16),
    /// Reports wheel events even without clipping.
    pub wheel: bool,
}

impl Scroll {
    pub const fn clips(&self) -> bool {
        self.x.clips() || self.y.clips()
    }

    pub const fn axis(&self, horizontal: bool) -> Overflow {
        if horizontal { self.x } else { self.y }
    }
}

/// A run of text with its alignment inside the element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub body: String,
    pub align: TextAlign,
    /// Cut to one line and mark the cut with an ellipsis.
    pub ellipsis: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(Text),
    Children(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub content: Content,
    pub frame: Frame,
    pub scroll: Scroll,
    pub style: Style,
    pub clickable: bool,
    data: HashMap<String, String>,
}

impl Element {
    fn with_content(content: Content, flow: Flow) -> Self {
        Self {
            id: anonymous_id(),
            content,
            frame: Frame {
                flow,
                ..Frame::default()
            },
            scroll: Scroll::default(),
            style: Style::default(),
            clickable: false,
            data: HashMap::new(),
        }
    }

    /// An empty box, for spacing.
    pub fn spacer() -> Self {
        Self::with_content(Content::Empty, Flow::Column)
    }

    pub fn column() -> Self {
        Self::with_content(Content::Children(Vec::new()), Flow::Column)
    }

    pub fn row() -> Self {
        Self::with_content(Content::Children(Vec::new()), Flow::Row)
    }

    pub fn text(body: impl Into<String>) -> Self {
        let text = Text {
            body: body.into(),
            ..Text::default()
        };
        Self::with_content(Content::Text(text), Flow::Column)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.frame.width = width;
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.frame.height = height;
        self
    }

    pub fn margin(mut self, margin: Insets) -> Self {
        self.frame.margin = margin;
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.frame.padding = padding;
        self
    }

    pub fn stretch(mut self) -> Self {
        self.frame.stretch = true;
        self
    }

    pub fn pinned(mut self, left: i16, top: i16) -> Self {
        self.frame.placement = Placement::Pinned { left, top };
        self
    }

    pub fn layer(mut self, layer: i16) -> Self {
        self.frame.layer = layer;
        self
    }

    pub fn scroll_x(mut self, overflow: Overflow) -> Self {
        self.scroll.x = overflow;
        self
    }

    pub fn scroll_y(mut self, overflow: Overflow) -> Self {
        self.scroll.y = overflow;
        self
    }

    pub fn offset(mut self, x: u16, y: u16) -> Self {
        self.scroll.offset = (x, y);
        self
    }

    pub fn wheel(mut self) -> Self {
        self.scroll.wheel = true;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Text only: center each line.
    pub fn centered(mut self) -> Self {
        if let Content::Text(text) = &mut self.content {
            text.align = TextAlign::Center;
        }
        self
    }

    /// Text only: keep the first line and cut it with an ellipsis.
    pub fn ellipsis(mut self) -> Self {
        if let Content::Text(text) = &mut self.content {
            text.ellipsis = true;
        }
        self
    }

    /// Make the element a click target carrying `value` under `key`.
    pub fn on_click(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.clickable = true;
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn click_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn child(self, child: Element) -> Self {
        self.children(std::iter::once(child))
    }

    /// Append children. Text content is replaced.
    pub fn children(mut self, more: impl IntoIterator<Item = Element>) -> Self {
        let mut children = match std::mem::take(&mut self.content) {
            Content::Children(children) => children,
            _ => Vec::new(),
        };
        children.extend(more);
        self.content = Content::Children(children);
        self
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(&text.body),
            _ => None,
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.frame.placement, Placement::Pinned { .. })
    }
}

/// Depth-first search for the element with `id`.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    root.child_elements()
        .iter()
        .find_map(|child| find_element(child, id))
}
