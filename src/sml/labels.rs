// sml/labels.rs
use std::collections::HashMap;
use std::fmt;

/// Jump targets: label name -> index into the program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    labels: HashMap<String, usize>,
}

/// Why a label definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelDefect {
    Empty,
    Duplicate(String),
}

impl Labels {
    pub fn new() -> Self {
        Labels::default()
    }

    /// Binds `label` to `address`. Empty names and redefinitions are rejected;
    /// the caller turns the defect into a per-line diagnostic.
    pub fn add(&mut self, label: &str, address: usize) -> Result<(), LabelDefect> {
        if label.is_empty() {
            return Err(LabelDefect::Empty);
        }
        if self.labels.contains_key(label) {
            return Err(LabelDefect::Duplicate(label.to_string()));
        }
        self.labels.insert(label.to_string(), address);
        Ok(())
    }

    /// Looks up the program index bound to `label`, if any.
    pub fn address_of(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Removes every binding before a fresh translation.
    pub fn reset(&mut self) {
        self.labels.clear();
    }
}

impl fmt::Display for Labels {
    /// "[name -> index, ...]" sorted by label name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.labels.iter().collect();
        entries.sort_by_key(|(name, _)| name.as_str());
        let body = entries
            .iter()
            .map(|(name, addr)| format!("{name} -> {addr}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{body}]")
    }
}
