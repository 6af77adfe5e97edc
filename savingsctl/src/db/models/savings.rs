//! Savings configuration rows and the name-keyed lookup built from them.

use std::collections::{HashMap, hash_map::Entry};
use tracing::warn;

/// Trim and lower-case a use case name for joining across tables
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Minutes saved per run for one use case
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsConfig {
    /// md5 of the use case name, stable across reads
    pub id: String,
    pub use_case_name: String,
    pub savings_type: Option<String>,
    pub fixed_minutes_per_run: f64,
    pub variable_minutes_per_success: f64,
    pub variable_minutes_per_partial: f64,
}

impl SavingsConfig {
    /// Zero savings, used when a use case has no configuration row
    pub fn zero(use_case_name: &str) -> Self {
        Self {
            id: String::new(),
            use_case_name: use_case_name.to_string(),
            savings_type: None,
            fixed_minutes_per_run: 0.0,
            variable_minutes_per_success: 0.0,
            variable_minutes_per_partial: 0.0,
        }
    }

    /// Whether the fixed amount is a flat per-period saving rather than a per-execution one
    pub fn is_fixed_type(&self) -> bool {
        self.savings_type.as_deref().is_some_and(|t| t.to_lowercase().contains("fix"))
    }
}

/// Savings configurations keyed by normalized use case name.
///
/// When several rows normalize to the same name the first one seen wins; callers feed rows in a
/// deterministic order so the choice is stable between requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsMap {
    by_name: HashMap<String, SavingsConfig>,
}

impl SavingsMap {
    pub fn from_configs(configs: impl IntoIterator<Item = SavingsConfig>) -> Self {
        let mut by_name = HashMap::new();
        for config in configs {
            match by_name.entry(normalize_name(&config.use_case_name)) {
                Entry::Vacant(slot) => {
                    slot.insert(config);
                }
                Entry::Occupied(existing) => {
                    warn!(
                        use_case = %existing.key(),
                        kept_type = ?existing.get().savings_type,
                        ignored_type = ?config.savings_type,
                        "Duplicate savings configuration, keeping the first row"
                    );
                }
            }
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&SavingsConfig> {
        self.by_name.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
