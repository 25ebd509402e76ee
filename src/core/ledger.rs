//! The record ledger - upsert-with-accumulation keyed by (part_id, area)

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::core::record::{DefectRecord, TIMESTAMP_FORMAT};

/// Errors for ledger submissions.
///
/// All variants are recoverable: the ledger is never mutated when a
/// submission is rejected, so the caller can correct the input and retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("part ID is required")]
    MissingPartId,

    #[error("part name is required (no existing record to fill it from)")]
    MissingPartName,

    #[error("production area is required")]
    MissingArea,

    #[error("at least one defect quantity must be non-zero")]
    NoDefects,

    #[error("invalid defect count '{0}': expected a non-negative whole number")]
    InvalidCount(String),
}

/// One user submission, as collected by the front end.
///
/// Field values arrive untrimmed; the ledger trims and validates them.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub part_id: String,
    pub part_name: String,
    pub area: String,
    pub defect1_count: u32,
    pub defect1_type: String,
    pub defect2_count: u32,
    pub defect2_type: String,
    pub note: String,
}

/// Parse a raw defect-count field.
///
/// Empty or whitespace-only input counts as 0 (an unfilled form field);
/// anything else must be a non-negative whole number.
pub fn parse_count(input: &str) -> Result<u32, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| LedgerError::InvalidCount(trimmed.to_string()))
}

/// In-memory table of defect records, at most one per (part_id, area).
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<DefectRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted records, preserving their order
    pub fn from_records(records: Vec<DefectRecord>) -> Self {
        Self { records }
    }

    /// All records in insertion order
    pub fn records(&self) -> &[DefectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record for a (part_id, area) pair
    pub fn get(&self, part_id: &str, area: &str) -> Option<&DefectRecord> {
        self.records
            .iter()
            .find(|r| r.part_id == part_id && r.area == area)
    }

    /// Part name from the first existing record for a part, if any.
    ///
    /// Used to fill a blank part-name field when the part is already known
    /// from another area; a lookup only, never a mutation.
    pub fn part_name_for(&self, part_id: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.part_id == part_id)
            .map(|r| r.part_name.as_str())
    }

    /// Record a submission, merging into the existing (part_id, area)
    /// record when one exists.
    ///
    /// Validation happens before any mutation: a rejected submission
    /// leaves the ledger exactly as it was.
    pub fn upsert(&mut self, submission: Submission, now: DateTime<Local>) -> Result<(), LedgerError> {
        let part_id = submission.part_id.trim().to_string();
        if part_id.is_empty() {
            return Err(LedgerError::MissingPartId);
        }

        let area = submission.area.trim().to_string();
        if area.is_empty() {
            return Err(LedgerError::MissingArea);
        }

        if submission.defect1_count == 0 && submission.defect2_count == 0 {
            return Err(LedgerError::NoDefects);
        }

        let part_name = {
            let trimmed = submission.part_name.trim();
            if trimmed.is_empty() {
                self.part_name_for(&part_id)
                    .map(str::to_string)
                    .ok_or(LedgerError::MissingPartName)?
            } else {
                trimmed.to_string()
            }
        };

        let stamp = now.format(TIMESTAMP_FORMAT).to_string();

        match self
            .records
            .iter_mut()
            .find(|r| r.part_id == part_id && r.area == area)
        {
            Some(record) => record.merge(&submission, &stamp),
            None => self
                .records
                .push(DefectRecord::first(part_id, part_name, area, &submission, &stamp)),
        }

        Ok(())
    }

    /// The presentation view: records sorted by part ID, then lexically by
    /// the formatted timestamp log.
    ///
    /// Consecutive rows sharing a part_id form a group; the renderer
    /// derives span boundaries by comparing adjacent part IDs. Recomputed
    /// on every call rather than maintained incrementally.
    pub fn grouped_view(&self) -> Vec<&DefectRecord> {
        let mut rows: Vec<&DefectRecord> = self.records.iter().collect();
        rows.sort_by(|a, b| {
            a.part_id
                .cmp(&b.part_id)
                .then_with(|| a.timestamp_log.cmp(&b.timestamp_log))
        });
        rows
    }

    /// Drop every record
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{NOTE_ADDED_MARKER, TYPE_PLACEHOLDER};
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 5, hour, minute, 0).unwrap()
    }

    fn submission(id: &str, name: &str, area: &str, count1: u32, type1: &str, note: &str) -> Submission {
        Submission {
            part_id: id.to_string(),
            part_name: name.to_string(),
            area: area.to_string(),
            defect1_count: count1,
            defect1_type: type1.to_string(),
            note: note.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_creates_record() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 3, "scratch", ""), at(9, 30))
            .unwrap();

        assert_eq!(ledger.len(), 1);
        let record = ledger.get("P1", "A1").unwrap();
        assert_eq!(record.defect1_count, 3);
        assert_eq!(record.defect1_type, "scratch");
        assert_eq!(record.defect2_type, TYPE_PLACEHOLDER);
        assert_eq!(record.note, NOTE_ADDED_MARKER);
        assert_eq!(record.timestamp_log, "2026-01-05 09:30");
    }

    #[test]
    fn test_upsert_merges_same_part_and_area() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 3, "scratch", ""), at(9, 30))
            .unwrap();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 2, "", "retest"), at(10, 15))
            .unwrap();

        assert_eq!(ledger.len(), 1);
        let record = ledger.get("P1", "A1").unwrap();
        assert_eq!(record.defect1_count, 5);
        assert_eq!(record.defect1_type, "scratch");
        assert_eq!(record.note, "добавлена запись, retest");
        assert_eq!(record.timestamp_log, "2026-01-05 09:30, 2026-01-05 10:15");
    }

    #[test]
    fn test_upsert_same_part_different_area_is_new_record() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 3, "", ""), at(9, 30))
            .unwrap();
        ledger
            .upsert(submission("P1", "Bracket", "A2", 1, "", ""), at(9, 45))
            .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("P1", "A1").unwrap().defect1_count, 3);
        assert_eq!(ledger.get("P1", "A2").unwrap().defect1_count, 1);
    }

    #[test]
    fn test_upsert_rejects_zero_defects() {
        let mut ledger = Ledger::new();
        let err = ledger
            .upsert(submission("P2", "Plate", "A1", 0, "", "note"), at(9, 30))
            .unwrap_err();

        assert_eq!(err, LedgerError::NoDefects);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_upsert_rejects_missing_fields() {
        let mut ledger = Ledger::new();

        let err = ledger
            .upsert(submission("  ", "Bracket", "A1", 1, "", ""), at(9, 30))
            .unwrap_err();
        assert_eq!(err, LedgerError::MissingPartId);

        let err = ledger
            .upsert(submission("P1", "Bracket", "", 1, "", ""), at(9, 30))
            .unwrap_err();
        assert_eq!(err, LedgerError::MissingArea);

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_blank_part_name_fills_from_existing_record() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 1, "", ""), at(9, 30))
            .unwrap();
        ledger
            .upsert(submission("P1", "", "A2", 2, "", ""), at(9, 45))
            .unwrap();

        assert_eq!(ledger.get("P1", "A2").unwrap().part_name, "Bracket");
    }

    #[test]
    fn test_blank_part_name_for_unknown_part_is_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger
            .upsert(submission("P9", "", "A1", 1, "", ""), at(9, 30))
            .unwrap_err();

        assert_eq!(err, LedgerError::MissingPartName);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_upsert_trims_fields() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission(" P1 ", " Bracket ", " A1 ", 1, " scratch ", " note "), at(9, 30))
            .unwrap();

        let record = ledger.get("P1", "A1").unwrap();
        assert_eq!(record.part_name, "Bracket");
        assert_eq!(record.defect1_type, "scratch");
        assert_eq!(record.note, "note");
    }

    #[test]
    fn test_grouped_view_keeps_parts_contiguous() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P2", "Plate", "A1", 1, "", ""), at(9, 0))
            .unwrap();
        ledger
            .upsert(submission("P1", "Bracket", "A2", 1, "", ""), at(9, 10))
            .unwrap();
        ledger
            .upsert(submission("P2", "Plate", "A3", 1, "", ""), at(9, 20))
            .unwrap();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 1, "", ""), at(9, 5))
            .unwrap();

        let view = ledger.grouped_view();
        let ids: Vec<&str> = view.iter().map(|r| r.part_id.as_str()).collect();
        assert_eq!(ids, ["P1", "P1", "P2", "P2"]);

        // Within a part, rows order by timestamp log
        assert_eq!(view[0].area, "A1");
        assert_eq!(view[1].area, "A2");
    }

    #[test]
    fn test_grouped_view_is_recomputed_after_mutation() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P2", "Plate", "A1", 1, "", ""), at(9, 0))
            .unwrap();
        assert_eq!(ledger.grouped_view().len(), 1);

        ledger
            .upsert(submission("P1", "Bracket", "A1", 1, "", ""), at(9, 5))
            .unwrap();
        let view = ledger.grouped_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].part_id, "P1");
    }

    #[test]
    fn test_reset_clears_all_records() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(submission("P1", "Bracket", "A1", 1, "", ""), at(9, 0))
            .unwrap();
        ledger.reset();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Ok(0));
        assert_eq!(parse_count("  "), Ok(0));
        assert_eq!(parse_count("7"), Ok(7));
        assert_eq!(parse_count(" 12 "), Ok(12));
        assert_eq!(
            parse_count("abc"),
            Err(LedgerError::InvalidCount("abc".to_string()))
        );
        assert_eq!(
            parse_count("-3"),
            Err(LedgerError::InvalidCount("-3".to_string()))
        );
    }
}
