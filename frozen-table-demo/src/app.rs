//! Terminal event loop.

use std::time::Duration;

use celldom::{Event, Key, Terminal};
use frozen_table::FrozenTable;
use log::{debug, info};

use crate::error::DemoError;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run(mut table: FrozenTable) -> Result<(), DemoError> {
    let mut terminal = Terminal::new()?;
    let step = i32::from(table.config().scroll_step);

    loop {
        let (width, _) = terminal.size();
        let theme = table.theme(width);
        terminal.set_clear_colors(theme.foreground, theme.background);

        let root = table.view(width);
        terminal.render(&root)?;
        let layout = terminal.layout();
        table.sync_extents(layout);

        for event in terminal.poll(POLL_INTERVAL)? {
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => {
                    info!("quit requested");
                    return Ok(());
                }
                Event::Key {
                    key: Key::Char('c'),
                    ctrl: true,
                } => return Ok(()),
                Event::Key { key: Key::Left, .. } => {
                    table.scroll_columns_by(-step);
                }
                Event::Key { key: Key::Right, .. } => {
                    table.scroll_columns_by(step);
                }
                Event::Key { key: Key::Up, .. } => table.scroll_list(-1),
                Event::Key { key: Key::Down, .. } => table.scroll_list(1),
                Event::Key {
                    key: Key::PageUp, ..
                } => table.scroll_list(-i32::from(layout_height(&terminal))),
                Event::Key {
                    key: Key::PageDown,
                    ..
                } => table.scroll_list(i32::from(layout_height(&terminal))),
                other => {
                    if table.handle_event(&other, &root, layout) {
                        debug!("handled {other:?}");
                    }
                }
            }
        }
    }
}

fn layout_height(terminal: &Terminal) -> u16 {
    terminal.size().1.saturating_sub(2).max(1)
}
