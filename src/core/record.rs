//! Defect record type - one ledger row per (part, area) pair

use serde::{Deserialize, Serialize};

use crate::core::ledger::Submission;

/// Placeholder written for a defect type slot that was never filled in
pub const TYPE_PLACEHOLDER: &str = "-";

/// Note entry recorded when the user supplies no text.
///
/// Kept in Russian ("record added") for compatibility with workbooks
/// produced by the original data-entry tool.
pub const NOTE_ADDED_MARKER: &str = "добавлена запись";

/// Minute-precision local timestamp format used in the timestamp log
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A defect record accumulated for one (part_id, area) combination.
///
/// Repeated submissions for the same pair merge into the existing record:
/// counts add up, defect types keep the latest non-empty value, and the
/// note/timestamp fields grow as comma-joined append-only logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    /// User-supplied part identifier (not unique by itself)
    pub part_id: String,

    /// Part name
    pub part_name: String,

    /// Production area
    pub area: String,

    /// First defect quantity (monotonically non-decreasing)
    pub defect1_count: u32,

    /// First defect type (`"-"` when never supplied)
    pub defect1_type: String,

    /// Second defect quantity (monotonically non-decreasing)
    pub defect2_count: u32,

    /// Second defect type (`"-"` when never supplied)
    pub defect2_type: String,

    /// Comma-joined log of notes, one entry per contributing submission
    pub note: String,

    /// Comma-joined log of `YYYY-MM-DD HH:MM` stamps, one per submission
    pub timestamp_log: String,
}

/// The note text actually logged for a submission: the trimmed user text,
/// or the added-record marker when the user supplied none.
pub fn note_or_marker(note: &str) -> &str {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        NOTE_ADDED_MARKER
    } else {
        trimmed
    }
}

impl DefectRecord {
    /// Create the first record for a (part_id, area) pair.
    ///
    /// `part_id`, `part_name`, and `area` must already be trimmed and
    /// validated by the ledger.
    pub(crate) fn first(part_id: String, part_name: String, area: String, submission: &Submission, stamp: &str) -> Self {
        let defect1_type = submission.defect1_type.trim();
        let defect2_type = submission.defect2_type.trim();
        Self {
            part_id,
            part_name,
            area,
            defect1_count: submission.defect1_count,
            defect1_type: if defect1_type.is_empty() {
                TYPE_PLACEHOLDER.to_string()
            } else {
                defect1_type.to_string()
            },
            defect2_count: submission.defect2_count,
            defect2_type: if defect2_type.is_empty() {
                TYPE_PLACEHOLDER.to_string()
            } else {
                defect2_type.to_string()
            },
            note: note_or_marker(&submission.note).to_string(),
            timestamp_log: stamp.to_string(),
        }
    }

    /// Fold a repeat submission into this record.
    ///
    /// Counts accumulate; a defect type is overwritten only by a non-empty
    /// value; the note and timestamp logs are appended, never rewritten.
    pub(crate) fn merge(&mut self, submission: &Submission, stamp: &str) {
        self.defect1_count += submission.defect1_count;
        self.defect2_count += submission.defect2_count;

        let defect1_type = submission.defect1_type.trim();
        if !defect1_type.is_empty() {
            self.defect1_type = defect1_type.to_string();
        }
        let defect2_type = submission.defect2_type.trim();
        if !defect2_type.is_empty() {
            self.defect2_type = defect2_type.to_string();
        }

        self.note.push_str(", ");
        self.note.push_str(note_or_marker(&submission.note));
        self.timestamp_log.push_str(", ");
        self.timestamp_log.push_str(stamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(count1: u32, type1: &str, count2: u32, type2: &str, note: &str) -> Submission {
        Submission {
            part_id: "P1".to_string(),
            part_name: "Bracket".to_string(),
            area: "A1".to_string(),
            defect1_count: count1,
            defect1_type: type1.to_string(),
            defect2_count: count2,
            defect2_type: type2.to_string(),
            note: note.to_string(),
        }
    }

    #[test]
    fn test_first_record_defaults() {
        let sub = submission(3, "", 0, "", "");
        let record = DefectRecord::first(
            "P1".to_string(),
            "Bracket".to_string(),
            "A1".to_string(),
            &sub,
            "2026-01-05 09:30",
        );

        assert_eq!(record.defect1_count, 3);
        assert_eq!(record.defect1_type, TYPE_PLACEHOLDER);
        assert_eq!(record.defect2_type, TYPE_PLACEHOLDER);
        assert_eq!(record.note, NOTE_ADDED_MARKER);
        assert_eq!(record.timestamp_log, "2026-01-05 09:30");
    }

    #[test]
    fn test_first_record_keeps_supplied_values() {
        let sub = submission(2, "scratch", 1, "dent", "first shift");
        let record = DefectRecord::first(
            "P1".to_string(),
            "Bracket".to_string(),
            "A1".to_string(),
            &sub,
            "2026-01-05 09:30",
        );

        assert_eq!(record.defect1_type, "scratch");
        assert_eq!(record.defect2_type, "dent");
        assert_eq!(record.note, "first shift");
    }

    #[test]
    fn test_merge_accumulates_counts_and_logs() {
        let mut record = DefectRecord::first(
            "P1".to_string(),
            "Bracket".to_string(),
            "A1".to_string(),
            &submission(3, "scratch", 0, "", ""),
            "2026-01-05 09:30",
        );

        record.merge(&submission(2, "", 1, "dent", "retest"), "2026-01-05 10:15");

        assert_eq!(record.defect1_count, 5);
        assert_eq!(record.defect2_count, 1);
        // Empty type preserves the prior value
        assert_eq!(record.defect1_type, "scratch");
        assert_eq!(record.defect2_type, "dent");
        assert_eq!(record.note, "добавлена запись, retest");
        assert_eq!(record.timestamp_log, "2026-01-05 09:30, 2026-01-05 10:15");
    }

    #[test]
    fn test_merge_latest_nonempty_type_wins() {
        let mut record = DefectRecord::first(
            "P1".to_string(),
            "Bracket".to_string(),
            "A1".to_string(),
            &submission(1, "scratch", 0, "", ""),
            "2026-01-05 09:30",
        );

        record.merge(&submission(1, "burr", 0, "", ""), "2026-01-05 10:15");
        assert_eq!(record.defect1_type, "burr");
    }

    #[test]
    fn test_note_or_marker() {
        assert_eq!(note_or_marker(""), NOTE_ADDED_MARKER);
        assert_eq!(note_or_marker("   "), NOTE_ADDED_MARKER);
        assert_eq!(note_or_marker(" retest "), "retest");
    }
}
