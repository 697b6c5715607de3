//! Row rendering: frozen label, scrollable value cells and detail blocks.
//!
//! Rendering is a pure function of the row, its expansion flag and the
//! current viewport offsets. Element ids are derived from the row id (see
//! [`ids`]) so the controller can route clicks and wheel events back to the
//! row they came from.

use celldom::{Element, Insets, Length, Overflow, Style};

use crate::model::{DetailEntry, Details, Row};
use crate::theme::Theme;

/// Data key carrying the row id on every element that toggles expansion.
pub const TOGGLE_KEY: &str = "toggle";

/// Column values that act as an expansion toggle regardless of detail kind.
pub const TOGGLE_SENTINELS: [&str; 2] = ["A3", "C4"];

const DETAILS_LABEL: &str = "Details";

/// Element id scheme shared by the renderer and the controller.
pub mod ids {
    pub fn block(id: &str) -> String {
        format!("block:{id}")
    }

    pub fn row(id: &str) -> String {
        format!("row:{id}")
    }

    pub fn label(id: &str) -> String {
        format!("label:{id}")
    }

    pub fn values(id: &str) -> String {
        format!("values:{id}")
    }

    pub fn cell(id: &str, index: usize) -> String {
        format!("cell:{id}:{index}")
    }

    pub fn accordion(id: &str) -> String {
        format!("accordion:{id}")
    }

    pub fn accordion_text(id: &str) -> String {
        format!("accordion-text:{id}")
    }

    pub fn detail(id: &str, index: usize) -> String {
        format!("detail:{id}:{index}")
    }

    pub fn detail_pad(id: &str, index: usize) -> String {
        format!("detail-pad:{id}:{index}")
    }

    pub fn detail_values(id: &str, index: usize) -> String {
        format!("detail-values:{id}:{index}")
    }
}

/// Down when expanded, up when collapsed.
pub fn indicator(expanded: bool) -> char {
    if expanded { '\u{2193}' } else { '\u{2191}' }
}

pub fn is_sentinel(value: &str) -> bool {
    TOGGLE_SENTINELS.contains(&value)
}

/// Everything about a row's surroundings the renderer needs.
pub struct RowContext<'a> {
    pub theme: &'a Theme,
    /// The structurally-last row: id equal to the row count.
    pub is_last: bool,
    /// Current horizontal offset of a viewport, by element id.
    pub offset_of: &'a dyn Fn(&str) -> u16,
}

/// Build the element subtree for one row.
///
/// Returns a column holding the data row and, when expanded, the detail
/// block for the row's detail kind.
pub fn render_row(row: &Row, expanded: bool, cx: &RowContext<'_>) -> Element {
    let block = Element::column()
        .id(ids::block(&row.id))
        .stretch()
        .child(data_row(row, expanded, cx));

    if !expanded {
        return block;
    }

    match &row.details {
        Details::Text(text) => block.child(accordion(row, text, cx)),
        Details::Entries(entries) => block.children(detail_rows(row, entries, cx)),
    }
}

fn data_row(row: &Row, expanded: bool, cx: &RowContext<'_>) -> Element {
    let theme = cx.theme;

    let mut label = Element::text(label_text(row, expanded))
        .id(ids::label(&row.id))
        .width(Length::Cells(theme.frozen_width))
        .ellipsis()
        .style(theme.text())
        .layer(1);
    if row.details.is_interactive_text() {
        label = label.on_click(TOGGLE_KEY, row.id.as_str());
    }

    let values_id = ids::values(&row.id);
    let offset = (cx.offset_of)(&values_id);
    let values = Element::row()
        .id(values_id)
        .width(Length::Fill)
        .margin(Insets::left(theme.value_gap))
        .scroll_x(if cx.is_last {
            Overflow::Scroll
        } else {
            Overflow::Hidden
        })
        .offset(offset, 0)
        .wheel()
        .children(
            row.other_columns
                .iter()
                .enumerate()
                .map(|(i, value)| value_cell(row, i, value, expanded, cx)),
        );

    Element::row()
        .id(ids::row(&row.id))
        .stretch()
        .layer(if cx.is_last { 2 } else { 1 })
        .style(theme.surface())
        .child(label)
        .child(values)
}

fn label_text(row: &Row, expanded: bool) -> String {
    if row.details.is_interactive_text() {
        format!("{}{}", row.name, indicator(expanded))
    } else {
        row.name.clone()
    }
}

fn value_cell(row: &Row, index: usize, value: &str, expanded: bool, cx: &RowContext<'_>) -> Element {
    let sentinel = is_sentinel(value);
    let text = if sentinel {
        format!("{value}  {}", indicator(expanded))
    } else {
        value.to_string()
    };

    let cell = Element::text(text)
        .id(ids::cell(&row.id, index))
        .width(Length::Cells(cx.theme.cell_width))
        .padding(Insets::sides(1))
        .ellipsis()
        .style(cx.theme.text());

    if sentinel {
        cell.on_click(TOGGLE_KEY, row.id.as_str())
    } else {
        cell
    }
}

fn accordion(row: &Row, text: &str, cx: &RowContext<'_>) -> Element {
    let theme = cx.theme;
    let text_id = ids::accordion_text(&row.id);
    let offset = (cx.offset_of)(&text_id);

    // Sits over the gutter rather than in the flow, like the frozen column
    let label = Element::text(DETAILS_LABEL)
        .width(Length::Cells(theme.frozen_width))
        .pinned(0, 0)
        .layer(1)
        .centered()
        .style(theme.text());

    let viewport = Element::row()
        .id(text_id)
        .width(Length::Fill)
        .margin(Insets::left(theme.detail_gutter))
        .scroll_x(Overflow::Scroll)
        .offset(offset, 0)
        .wheel()
        .child(Element::text(text).style(theme.text()));

    Element::row()
        .id(ids::accordion(&row.id))
        .stretch()
        .style(theme.surface())
        .child(label)
        .child(viewport)
}

fn detail_rows(row: &Row, entries: &[DetailEntry], cx: &RowContext<'_>) -> Vec<Element> {
    let theme = cx.theme;
    let placeholder = Style::default()
        .fg(theme.separator)
        .bg(theme.background);
    let last = entries.len().saturating_sub(1);

    entries
        .iter()
        .enumerate()
        .map(|(k, entry)| {
            let values_id = ids::detail_values(&row.id, k);
            let offset = (cx.offset_of)(&values_id);

            let cells = (0..row.other_columns.len()).map(|i| {
                let (text, style) = if i == 0 {
                    (entry.value.as_str(), theme.text())
                } else {
                    ("-", placeholder)
                };
                Element::text(text)
                    .width(Length::Cells(theme.cell_width))
                    .padding(Insets::sides(1))
                    .ellipsis()
                    .style(style)
            });

            let values = Element::row()
                .id(values_id)
                .width(Length::Fill)
                .margin(Insets::left(theme.value_gap))
                .scroll_x(if k == last {
                    Overflow::Scroll
                } else {
                    Overflow::Hidden
                })
                .offset(offset, 0)
                .wheel()
                .children(cells);

            Element::row()
                .id(ids::detail(&row.id, k))
                .stretch()
                .style(theme.surface())
                .child(
                    Element::spacer()
                        .id(ids::detail_pad(&row.id, k))
                        .width(Length::Cells(theme.frozen_width)),
                )
                .child(values)
        })
        .collect()
}
