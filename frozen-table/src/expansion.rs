use std::collections::HashMap;

/// Which rows currently show their details, keyed by row id.
///
/// Ids that were never toggled read as collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionStore {
    state: HashMap<String, bool>,
}

impl ExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `id` and return the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let entry = self.state.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        log::debug!("row {id} {}", if *entry { "expanded" } else { "collapsed" });
        *entry
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.get(id).copied().unwrap_or(false)
    }

    /// Ids currently expanded, sorted for stable output.
    pub fn expanded_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .state
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}
