pub mod buffer;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use element::{
    find_element, Content, Element, Flow, Frame, Insets, Length, Overflow, Placement, Scroll,
    Text, TextAlign,
};
pub use event::{Event, Key, MouseButton};
pub use hit::{hit_test, hit_test_scrollable};
pub use layout::{LayoutResult, Rect};
pub use style::{Rgb, Style};
pub use terminal::Terminal;
