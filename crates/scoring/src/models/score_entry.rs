use std::collections::BTreeMap;

use super::criterion::Criterion;
use super::oral_marks::OralMarksRecord;

/// Live editing state of one team's score sheet.
///
/// Values are kept as the strings the juror typed (after clamping), with the
/// empty string meaning "cleared". Numeric interpretation happens only when
/// totals are computed or the sheet is prepared for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    scores: BTreeMap<Criterion, String>,
    overall_comments: String,
    extra: BTreeMap<String, String>,
}

impl ScoreEntry {
    /// Every criterion cleared and no comment.
    pub fn new() -> Self {
        Self {
            scores: Criterion::ALL
                .into_iter()
                .map(|c| (c, String::new()))
                .collect(),
            overall_comments: String::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Seeds a sheet from a persisted record, on top of the cleared state.
    pub fn from_record(record: &OralMarksRecord) -> Self {
        let mut entry = Self::new();
        for criterion in Criterion::ALL {
            entry.set_raw(criterion, record.scores.get(criterion).normalize().to_string());
        }
        entry.overall_comments = record.overall_comments.clone().unwrap_or_default();
        entry
    }

    pub fn score(&self, criterion: Criterion) -> &str {
        self.scores.get(&criterion).map(String::as_str).unwrap_or("")
    }

    pub fn overall_comments(&self) -> &str {
        &self.overall_comments
    }

    /// Fields outside the rubric that were written through `set_score`.
    pub fn extra(&self, field: &str) -> Option<&str> {
        self.extra.get(field).map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        self.scores.values().all(String::is_empty)
            && self.overall_comments.is_empty()
            && self.extra.is_empty()
    }

    pub(crate) fn set_raw(&mut self, criterion: Criterion, value: String) {
        self.scores.insert(criterion, value);
    }

    pub(crate) fn set_comments(&mut self, value: String) {
        self.overall_comments = value;
    }

    pub(crate) fn set_extra(&mut self, field: String, value: String) {
        self.extra.insert(field, value);
    }
}

impl Default for ScoreEntry {
    fn default() -> Self {
        Self::new()
    }
}
