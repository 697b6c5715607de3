//! Table configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::theme::Platform;

/// Layout and behaviour parameters for a [`FrozenTable`](crate::FrozenTable).
///
/// All widths are in terminal cells. Missing fields take their defaults, so
/// a partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Colour scheme selection.
    pub platform: Platform,
    /// Area width below which the frozen column is a fraction of the width.
    pub breakpoint: u16,
    /// Frozen column width as a fraction of the area, below the breakpoint.
    pub frozen_fraction: f32,
    /// Frozen column width at or above the breakpoint.
    pub frozen_fixed_width: u16,
    /// Accordion text indent as a fraction of the area, below the breakpoint.
    pub gutter_fraction: f32,
    /// Accordion text indent at or above the breakpoint.
    pub gutter_fixed_width: u16,
    /// Width of every value cell.
    pub cell_width: u16,
    /// Cells moved per wheel notch or arrow key.
    pub scroll_step: u16,
    /// Label drawn after the last row.
    pub total_label: String,
    /// Blank lines after the total label.
    pub bottom_padding: u16,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Native,
            breakpoint: 60,
            frozen_fraction: 0.35,
            frozen_fixed_width: 16,
            gutter_fraction: 0.40,
            gutter_fixed_width: 17,
            cell_width: 16,
            scroll_step: 4,
            total_label: "Total".to_string(),
            bottom_padding: 2,
        }
    }
}

impl TableConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: TableConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_width == 0 {
            return Err(TableError::InvalidConfig(
                "cellWidth must be at least 1".into(),
            ));
        }
        if self.scroll_step == 0 {
            return Err(TableError::InvalidConfig(
                "scrollStep must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("frozenFraction", self.frozen_fraction),
            ("gutterFraction", self.gutter_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TableError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}
