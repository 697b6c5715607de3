//! Rows shown when no `--rows` file is given.

use frozen_table::{DetailEntry, Details, Row};

const COLUMNS: usize = 6;

pub fn rows() -> Vec<Row> {
    vec![
        row(
            "1",
            "Revenue",
            'A',
            Details::Text("Gross revenue before returns and discounts".into()),
        ),
        row(
            "2",
            "Costs",
            'B',
            Details::Entries(vec![
                DetailEntry::new("Materials"),
                DetailEntry::new("Labour"),
                DetailEntry::new("Overhead"),
            ]),
        ),
        row("3", "Margin", 'C', Details::default()),
        row(
            "4",
            "Headcount",
            'D',
            Details::Text("Full-time equivalents at the end of each period".into()),
        ),
        row(
            "5",
            "Regions",
            'E',
            Details::Entries(vec![DetailEntry::new("North"), DetailEntry::new("South")]),
        ),
        row("6", "Net", 'F', Details::Text("Margin after tax".into())),
    ]
}

/// Column values are `{prefix}{n}`, so row C carries the "C4" toggle cell
/// and row A the "A3" one.
fn row(id: &str, name: &str, prefix: char, details: Details) -> Row {
    Row::new(
        id,
        name,
        (1..=COLUMNS).map(|n| format!("{prefix}{n}")),
        details,
    )
}
