//! Autocomplete history - previously typed values for the three input fields

use serde::{Deserialize, Serialize};

/// Which input field a history entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryField {
    /// Part identifiers
    Ids,
    /// Part names
    Details,
    /// Production areas
    Areas,
}

impl std::fmt::Display for HistoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryField::Ids => write!(f, "ids"),
            HistoryField::Details => write!(f, "details"),
            HistoryField::Areas => write!(f, "areas"),
        }
    }
}

impl std::str::FromStr for HistoryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ids" => Ok(HistoryField::Ids),
            "details" => Ok(HistoryField::Details),
            "areas" => Ok(HistoryField::Areas),
            _ => Err(format!(
                "Invalid history field: {}. Use ids, details, or areas",
                s
            )),
        }
    }
}

/// Previously seen values for the part-ID, part-name, and area fields,
/// newest first. Backs the autocomplete suggestions in interactive entry.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HistoryStore {
    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub details: Vec<String>,

    #[serde(default)]
    pub areas: Vec<String>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self, field: HistoryField) -> &Vec<String> {
        match field {
            HistoryField::Ids => &self.ids,
            HistoryField::Details => &self.details,
            HistoryField::Areas => &self.areas,
        }
    }

    fn entries_mut(&mut self, field: HistoryField) -> &mut Vec<String> {
        match field {
            HistoryField::Ids => &mut self.ids,
            HistoryField::Details => &mut self.details,
            HistoryField::Areas => &mut self.areas,
        }
    }

    /// Remember a typed value, newest first.
    ///
    /// Empty (after trimming) and already-present values are ignored, so
    /// repeated calls with the same text are no-ops after the first.
    pub fn record_seen(&mut self, field: HistoryField, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        let entries = self.entries_mut(field);
        if entries.iter().any(|e| e == trimmed) {
            return;
        }
        entries.insert(0, trimmed.to_string());
    }

    /// The stored sequence for a field, most recent first
    pub fn suggestions(&self, field: HistoryField) -> &[String] {
        self.entries(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_seen_inserts_newest_first() {
        let mut history = HistoryStore::new();
        history.record_seen(HistoryField::Ids, "P1");
        history.record_seen(HistoryField::Ids, "P2");

        assert_eq!(history.suggestions(HistoryField::Ids), ["P2", "P1"]);
    }

    #[test]
    fn test_record_seen_is_idempotent() {
        let mut history = HistoryStore::new();
        history.record_seen(HistoryField::Areas, "milling");
        history.record_seen(HistoryField::Areas, "milling");

        assert_eq!(history.suggestions(HistoryField::Areas), ["milling"]);
    }

    #[test]
    fn test_record_seen_trims_and_skips_empty() {
        let mut history = HistoryStore::new();
        history.record_seen(HistoryField::Details, "  Bracket  ");
        history.record_seen(HistoryField::Details, "   ");
        history.record_seen(HistoryField::Details, "");

        assert_eq!(history.suggestions(HistoryField::Details), ["Bracket"]);
    }

    #[test]
    fn test_record_seen_is_case_sensitive() {
        let mut history = HistoryStore::new();
        history.record_seen(HistoryField::Ids, "p1");
        history.record_seen(HistoryField::Ids, "P1");

        assert_eq!(history.suggestions(HistoryField::Ids), ["P1", "p1"]);
    }

    #[test]
    fn test_fields_are_independent() {
        let mut history = HistoryStore::new();
        history.record_seen(HistoryField::Ids, "P1");

        assert!(history.suggestions(HistoryField::Details).is_empty());
        assert!(history.suggestions(HistoryField::Areas).is_empty());
    }

    #[test]
    fn test_history_field_from_str() {
        assert_eq!("ids".parse::<HistoryField>().unwrap(), HistoryField::Ids);
        assert_eq!(
            "Details".parse::<HistoryField>().unwrap(),
            HistoryField::Details
        );
        assert_eq!("areas".parse::<HistoryField>().unwrap(), HistoryField::Areas);
        assert!("parts".parse::<HistoryField>().is_err());
    }

    #[test]
    fn test_json_roundtrip_shape() {
        let mut history = HistoryStore::new();
        history.record_seen(HistoryField::Ids, "P1");
        history.record_seen(HistoryField::Areas, "milling");

        let json = serde_json::to_string(&history).unwrap();
        let parsed: HistoryStore = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ids, ["P1"]);
        assert!(parsed.details.is_empty());
        assert_eq!(parsed.areas, ["milling"]);
    }
}
