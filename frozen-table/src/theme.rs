//! Platform colours and responsive widths.

use celldom::{Rgb, Style};
use serde::{Deserialize, Serialize};

use crate::config::TableConfig;

/// Which colour scheme to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Light scheme: white background, black text.
    Web,
    /// Dark scheme: black background, white text.
    #[default]
    Native,
}

/// Resolved style parameters for one area width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub platform: Platform,
    pub background: Rgb,
    pub foreground: Rgb,
    pub separator: Rgb,
    pub frozen_width: u16,
    pub detail_gutter: u16,
    pub value_gap: u16,
    pub cell_width: u16,
}

impl Theme {
    pub fn resolve(config: &TableConfig, area_width: u16) -> Self {
        let (background, foreground) = match config.platform {
            Platform::Web => (Rgb::WHITE, Rgb::BLACK),
            Platform::Native => (Rgb::BLACK, Rgb::WHITE),
        };
        let narrow = area_width < config.breakpoint;
        let fraction_of = |fraction: f32| (area_width as f32 * fraction).round() as u16;

        Self {
            platform: config.platform,
            background,
            foreground,
            separator: Rgb::gray(0x55),
            frozen_width: if narrow {
                fraction_of(config.frozen_fraction)
            } else {
                config.frozen_fixed_width
            },
            detail_gutter: if narrow {
                fraction_of(config.gutter_fraction)
            } else {
                config.gutter_fixed_width
            },
            value_gap: match config.platform {
                Platform::Web => 0,
                Platform::Native => 1,
            },
            cell_width: config.cell_width,
        }
    }

    pub fn text(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
    }

    pub fn surface(&self) -> Style {
        Style::default().bg(self.background)
    }
}
