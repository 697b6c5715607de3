//! A table with a frozen leading column and horizontally synchronized rows.
//!
//! Each row shows its name in a fixed-width column and its remaining values
//! in a viewport that scrolls sideways. All row viewports move together:
//! scrolling one broadcasts its offset to the others through
//! [`ScrollSync`]. Rows can expand to reveal either a line of text or a list
//! of sub-rows, which scroll together as a separate group.
//!
//! ```no_run
//! use frozen_table::{Details, FrozenTable, Row, TableConfig};
//!
//! let rows = vec![Row::new("1", "A", ["x", "A3"], Details::Text("hello".into()))];
//! let mut table = FrozenTable::mount(rows, TableConfig::default());
//! table.toggle("1");
//! let tree = table.view(80);
//! ```

pub mod config;
pub mod error;
pub mod expansion;
pub mod model;
pub mod row;
pub mod scroll_sync;
pub mod table;
pub mod theme;

pub use config::TableConfig;
pub use error::{Result, TableError};
pub use expansion::ExpansionStore;
pub use model::{audit_rows, load_rows, DetailEntry, Details, Row, RowAudit};
pub use row::{render_row, RowContext};
pub use scroll_sync::{HandleId, ScrollGroup, ScrollRole, ScrollSync, ScrollTarget, Viewport};
pub use table::FrozenTable;
pub use theme::{Platform, Theme};
