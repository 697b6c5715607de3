//! The table controller.
//!
//! [`FrozenTable`] owns the rows, the expansion state and the scroll
//! coordinator. It mounts one [`Viewport`] per scrollable region, keeps the
//! registrations in step with the rows and their expansion, and builds the
//! element tree for each frame.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use celldom::{
    find_element, hit_test, hit_test_scrollable, Element, Event, Insets, LayoutResult, Length,
    MouseButton, Overflow,
};
use log::{debug, info, warn};

use crate::config::TableConfig;
use crate::expansion::ExpansionStore;
use crate::model::{audit_rows, Details, Row};
use crate::row::{ids, render_row, RowContext, TOGGLE_KEY};
use crate::scroll_sync::{HandleId, ScrollGroup, ScrollRole, ScrollSync, ScrollTarget, Viewport};
use crate::theme::Theme;

pub const TABLE_ID: &str = "frozen-table";
pub const LIST_ID: &str = "frozen-table:list";
pub const TOTAL_ID: &str = "frozen-table:total";

struct Mount {
    group: ScrollGroup,
    handle: HandleId,
    viewport: Rc<Viewport>,
}

/// A scrollable region a row needs while it is on screen.
struct ViewportSpec {
    element_id: String,
    group: ScrollGroup,
    role: ScrollRole,
}

pub struct FrozenTable {
    config: TableConfig,
    rows: Vec<Row>,
    expansion: ExpansionStore,
    sync: Rc<ScrollSync>,
    /// Rows present when the table was mounted; only these drive the primary group.
    sources: HashSet<String>,
    mounted: HashMap<String, Mount>,
    list_offset: u16,
}

impl FrozenTable {
    pub fn mount(rows: Vec<Row>, config: TableConfig) -> Self {
        report_audit(&rows);

        let sources: HashSet<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut table = Self {
            config,
            rows: Vec::new(),
            expansion: ExpansionStore::new(),
            sync: Rc::new(ScrollSync::new()),
            sources,
            mounted: HashMap::new(),
            list_offset: 0,
        };

        for row in &rows {
            table.mount_row(row);
        }
        table.rows = rows;

        info!(
            "mounted table with {} rows, {} viewports",
            table.rows.len(),
            table.mounted.len()
        );
        table
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn theme(&self, area_width: u16) -> Theme {
        Theme::resolve(&self.config, area_width)
    }

    /// Replace the row sequence, keeping mounts and expansion for ids that survive.
    ///
    /// Rows that were not part of the initial mount join the primary group
    /// as receivers.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        report_audit(&rows);

        let incoming: HashMap<&str, &Row> = rows.iter().map(|r| (r.id.as_str(), r)).collect();
        let outgoing = std::mem::take(&mut self.rows);

        for old in &outgoing {
            match incoming.get(old.id.as_str()) {
                None => {
                    debug!("row {} removed", old.id);
                    self.unmount_row(old);
                }
                Some(new) => {
                    // Detail shape may have changed under the same id
                    let keep: HashSet<String> = self
                        .detail_specs(new)
                        .into_iter()
                        .map(|spec| spec.element_id)
                        .collect();
                    for spec in self.detail_specs(old) {
                        if !keep.contains(&spec.element_id) {
                            self.unmount_viewport(&spec.element_id);
                        }
                    }
                }
            }
        }

        for row in &rows {
            self.mount_row(row);
        }
        self.rows = rows;
    }

    /// Let a row added after mount drive the primary group.
    pub fn promote_to_source(&mut self, id: &str) -> bool {
        let element_id = ids::values(id);
        let Some(mount) = self.mounted.get(&element_id) else {
            return false;
        };
        self.sources.insert(id.to_string());
        self.sync
            .set_role(mount.group, mount.handle, ScrollRole::Source)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Flip a row's expansion and mount or unmount its detail viewports.
    /// Returns the new state. Unknown ids only touch the expansion state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let expanded = self.expansion.toggle(id);

        let specs = match self.rows.iter().find(|r| r.id == id) {
            Some(row) => self.detail_specs(row),
            None => {
                debug!("toggle on unknown row {id}");
                return expanded;
            }
        };

        for spec in specs {
            if expanded {
                self.mount_viewport(spec);
            } else {
                self.unmount_viewport(&spec.element_id);
            }
        }

        expanded
    }

    /// A user scroll on one viewport: move it, then bring its group along.
    /// Returns how many other viewports were moved.
    pub fn scroll_viewport(&mut self, element_id: &str, x: u16) -> usize {
        let Some(mount) = self.mounted.get(element_id) else {
            debug!("scroll on unmounted viewport {element_id}");
            return 0;
        };
        mount.viewport.jump_to(x);
        self.sync
            .on_scroll(mount.group, mount.handle, mount.viewport.offset_x())
    }

    /// Relative form of [`scroll_viewport`](Self::scroll_viewport).
    pub fn scroll_viewport_by(&mut self, element_id: &str, dx: i32) -> usize {
        let Some(current) = self.offset_of(element_id) else {
            return 0;
        };
        self.scroll_viewport(element_id, offset_by(current, dx))
    }

    /// Scroll the row columns from the keyboard, as if the first source row
    /// had been dragged.
    pub fn scroll_columns_by(&mut self, dx: i32) -> usize {
        let source = self
            .rows
            .iter()
            .map(|r| ids::values(&r.id))
            .find(|element_id| {
                self.mounted.get(element_id).is_some_and(|m| {
                    self.sync.role(m.group, m.handle) == Some(ScrollRole::Source)
                })
            });
        match source {
            Some(element_id) => self.scroll_viewport_by(&element_id, dx),
            None => 0,
        }
    }

    pub fn scroll_list(&mut self, dy: i32) {
        self.list_offset = offset_by(self.list_offset, dy);
    }

    pub fn list_offset(&self) -> u16 {
        self.list_offset
    }

    pub fn offset_of(&self, element_id: &str) -> Option<u16> {
        self.mounted
            .get(element_id)
            .map(|mount| mount.viewport.offset_x())
    }

    pub fn role_of(&self, element_id: &str) -> Option<ScrollRole> {
        let mount = self.mounted.get(element_id)?;
        self.sync.role(mount.group, mount.handle)
    }

    /// Element ids of the viewports mounted in `group`, sorted.
    pub fn viewport_ids(&self, group: ScrollGroup) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .mounted
            .iter()
            .filter(|(_, mount)| mount.group == group)
            .map(|(id, _)| id.as_str())
            .collect();
        found.sort_unstable();
        found
    }

    /// Clamp offsets to the content measured by the last layout.
    pub fn sync_extents(&mut self, layout: &LayoutResult) {
        for (element_id, mount) in &self.mounted {
            if let Some(max) = layout.max_scroll_x(element_id) {
                mount.viewport.set_max_offset(Some(max));
            }
        }
        if let Some(max) = layout.max_scroll_y(LIST_ID) {
            self.list_offset = self.list_offset.min(max);
        }
    }

    /// Build the element tree for an area `area_width` cells wide.
    pub fn view(&self, area_width: u16) -> Element {
        let theme = self.theme(area_width);
        let last_id = self.rows.len().to_string();
        let offset_of = |element_id: &str| self.offset_of(element_id).unwrap_or(0);

        let rows = self.rows.iter().map(|row| {
            let cx = RowContext {
                theme: &theme,
                is_last: row.id == last_id,
                offset_of: &offset_of,
            };
            render_row(row, self.expansion.is_expanded(&row.id), &cx)
        });

        let list = Element::column()
            .id(LIST_ID)
            .width(Length::Fill)
            .height(Length::Fill)
            .stretch()
            .scroll_y(Overflow::Auto)
            .offset(0, self.list_offset)
            .wheel()
            .style(theme.surface())
            .children(rows)
            .child(Element::spacer().height(Length::Cells(self.config.bottom_padding)));

        let total = Element::text(self.config.total_label.as_str())
            .id(TOTAL_ID)
            .width(Length::Fill)
            .margin(Insets::top(1))
            .centered()
            .style(theme.text().bold());

        Element::column()
            .id(TABLE_ID)
            .width(Length::Fill)
            .height(Length::Fill)
            .stretch()
            .style(theme.surface())
            .child(list)
            .child(total)
    }

    /// Route an input event against the tree and layout of the last frame.
    /// Returns whether the table needs to be redrawn.
    pub fn handle_event(&mut self, event: &Event, root: &Element, layout: &LayoutResult) -> bool {
        match event {
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => {
                let row_id = hit_test(layout, root, *x, *y)
                    .and_then(|id| find_element(root, &id))
                    .and_then(|element| element.click_data(TOGGLE_KEY))
                    .map(str::to_string);
                match row_id {
                    Some(row_id) => {
                        self.toggle(&row_id);
                        true
                    }
                    None => false,
                }
            }
            Event::Scroll {
                x,
                y,
                delta_x,
                delta_y,
            } => {
                let mut changed = false;
                if *delta_x != 0
                    && let Some(element_id) = hit_test_scrollable(layout, root, *x, *y)
                    && self.mounted.contains_key(&element_id)
                {
                    let dx = i32::from(*delta_x) * i32::from(self.config.scroll_step);
                    self.scroll_viewport_by(&element_id, dx);
                    changed = true;
                }
                if *delta_y != 0 {
                    self.scroll_list(i32::from(*delta_y));
                    changed = true;
                }
                changed
            }
            Event::Resize { .. } => true,
            _ => false,
        }
    }

    fn mount_row(&mut self, row: &Row) {
        let role = if self.sources.contains(&row.id) {
            ScrollRole::Source
        } else {
            ScrollRole::Receiver
        };
        self.mount_viewport(ViewportSpec {
            element_id: ids::values(&row.id),
            group: ScrollGroup::Primary,
            role,
        });

        if self.expansion.is_expanded(&row.id) {
            for spec in self.detail_specs(row) {
                self.mount_viewport(spec);
            }
        }
    }

    fn unmount_row(&mut self, row: &Row) {
        self.unmount_viewport(&ids::values(&row.id));
        for spec in self.detail_specs(row) {
            self.unmount_viewport(&spec.element_id);
        }
    }

    fn detail_specs(&self, row: &Row) -> Vec<ViewportSpec> {
        match &row.details {
            Details::Text(_) => vec![ViewportSpec {
                element_id: ids::accordion_text(&row.id),
                group: ScrollGroup::Primary,
                role: ScrollRole::Receiver,
            }],
            Details::Entries(entries) => (0..entries.len())
                .map(|k| ViewportSpec {
                    element_id: ids::detail_values(&row.id, k),
                    group: ScrollGroup::Secondary,
                    role: ScrollRole::Source,
                })
                .collect(),
        }
    }

    fn mount_viewport(&mut self, spec: ViewportSpec) {
        if self.mounted.contains_key(&spec.element_id) {
            return;
        }
        let viewport = Rc::new(Viewport::new());
        let handle = self.sync.register(spec.group, &viewport, spec.role);
        debug!("mounted {} as {handle}", spec.element_id);
        self.mounted.insert(
            spec.element_id,
            Mount {
                group: spec.group,
                handle,
                viewport,
            },
        );
    }

    fn unmount_viewport(&mut self, element_id: &str) -> bool {
        match self.mounted.remove(element_id) {
            Some(mount) => {
                self.sync.unregister(mount.group, mount.handle);
                debug!("unmounted {element_id}");
                true
            }
            None => false,
        }
    }
}

impl Drop for FrozenTable {
    fn drop(&mut self) {
        for (_, mount) in self.mounted.drain() {
            self.sync.unregister(mount.group, mount.handle);
        }
    }
}

fn offset_by(current: u16, delta: i32) -> u16 {
    (i32::from(current) + delta).clamp(0, i32::from(u16::MAX)) as u16
}

fn report_audit(rows: &[Row]) {
    let audit = audit_rows(rows);
    for id in &audit.duplicate_ids {
        warn!("duplicate row id {id}: expansion and scroll state are shared");
    }
    for (id, count) in &audit.column_mismatches {
        warn!("row {id} has {count} columns; scrolled columns will not line up");
    }
}
