use crate::element::Insets;

/// A rectangle in terminal cells.
///
/// The origin is signed: children of a scrolled container are laid out
/// at their content position minus the scroll offset and may start
/// left of (or above) the visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Origin along the horizontal (`true`) or vertical axis.
    pub(crate) const fn start(&self, horizontal: bool) -> i32 {
        if horizontal { self.x } else { self.y }
    }

    /// Size along the horizontal (`true`) or vertical axis.
    pub(crate) const fn extent(&self, horizontal: bool) -> u16 {
        if horizontal { self.width } else { self.height }
    }

    /// The area left inside `insets`.
    pub fn inset(self, insets: Insets) -> Self {
        Self {
            x: self.x + i32::from(insets.left),
            y: self.y + i32::from(insets.top),
            width: self.width.saturating_sub(insets.along(true)),
            height: self.height.saturating_sub(insets.along(false)),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x..self.right()).contains(&x) && (self.y..self.bottom()).contains(&y)
    }

    /// Overlapping area of two rects; zero-sized when disjoint.
    pub fn intersect(&self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = (self.right().min(other.right()) - x).max(0);
        let height = (self.bottom().min(other.bottom()) - y).max(0);
        Rect::new(x, y, width as u16, height as u16)
    }
}
