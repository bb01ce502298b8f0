//! Last-write-wins reconciliation of quiz collections.
//!
//! Merges an incoming collection (from a sync response or an import) into
//! an existing one, keyed by quiz ID. For each incoming record the higher
//! version wins; ties favor the incoming record, and an unset version on
//! either side also favors the incoming record. On acceptance the stored
//! record adopts the incoming version wholesale, so two devices that
//! exchange the same edit converge instead of re-bumping each other.
//!
//! Records present locally but absent from the incoming batch are left
//! untouched: this is a merge, not a replace-all. Deletions carry no
//! tombstone, so a record deleted here reappears if a peer that never saw
//! the delete syncs it back.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{Quiz, QuizId};

/// What happened to each incoming record during a merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Records inserted as new
    pub added: Vec<QuizId>,
    /// Records that replaced an existing entry
    pub updated: Vec<QuizId>,
    /// Records discarded because the existing entry was newer
    pub skipped_stale: Vec<QuizId>,
    /// Records rejected outright, by incoming index, with the reason
    pub rejected: Vec<(usize, String)>,
}

impl MergeReport {
    /// Whether the merge changed the existing collection at all
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }

    /// IDs written by the merge, in added-then-updated order
    #[must_use]
    pub fn written_ids(&self) -> Vec<QuizId> {
        self.added
            .iter()
            .chain(self.updated.iter())
            .copied()
            .collect()
    }
}

/// Merge `incoming` into `existing` with last-write-wins semantics.
///
/// Processes incoming records in input order. Updated records keep their
/// position in `existing`; new records are appended. A malformed record is
/// reported and skipped without aborting the rest of the batch.
pub fn reconcile(existing: &mut Vec<Quiz>, incoming: Vec<Quiz>) -> MergeReport {
    let mut report = MergeReport::default();

    for (index, mut record) in incoming.into_iter().enumerate() {
        if let Err(error) = record.validate() {
            let reason = match error {
                Error::RecordValidation(reason) => reason,
                other => other.to_string(),
            };
            tracing::warn!(index, %reason, "rejected incoming quiz record");
            report.rejected.push((index, reason));
            continue;
        }

        // Identity must never be nil once the record is held.
        if record.id.is_nil() {
            record.id = QuizId::new();
        }

        match existing.iter().position(|quiz| quiz.id == record.id) {
            None => {
                record.version = record.version.max(1);
                report.added.push(record.id);
                existing.push(record);
            }
            Some(position) => {
                let local = &mut existing[position];
                if accepts(local.version, record.version) {
                    local.adopt(record);
                    report.updated.push(local.id);
                } else {
                    tracing::debug!(
                        id = %local.id,
                        local_version = local.version,
                        incoming_version = record.version,
                        "kept local quiz over stale incoming record"
                    );
                    report.skipped_stale.push(local.id);
                }
            }
        }
    }

    report
}

/// LWW acceptance rule: unset versions always accept, ties favor incoming.
const fn accepts(local_version: u64, incoming_version: u64) -> bool {
    local_version == 0 || incoming_version == 0 || incoming_version >= local_version
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;
    use pretty_assertions::assert_eq;

    fn question() -> Question {
        Question {
            prompt: "Capital of France?".to_string(),
            choices: vec!["Paris".to_string(), "Lyon".to_string()],
            correct: 0,
            image_url: None,
        }
    }

    fn quiz(title: &str, version: u64) -> Quiz {
        let mut quiz = Quiz::new(title, vec![question()]);
        quiz.version = version;
        quiz
    }

    #[test]
    fn incoming_with_higher_version_wins() {
        let local = quiz("Local title", 3);
        let id = local.id;
        let mut remote = quiz("Remote title", 5);
        remote.id = id;

        let mut existing = vec![local];
        let report = reconcile(&mut existing, vec![remote]);

        assert_eq!(report.updated, vec![id]);
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].title, "Remote title");
        // Version adopted from the incoming record: progressed beyond 3.
        assert_eq!(existing[0].version, 5);
    }

    #[test]
    fn stale_incoming_is_discarded() {
        let local = quiz("Local title", 5);
        let id = local.id;
        let mut remote = quiz("Remote title", 3);
        remote.id = id;

        let mut existing = vec![local.clone()];
        let report = reconcile(&mut existing, vec![remote]);

        assert_eq!(report.skipped_stale, vec![id]);
        assert!(report.updated.is_empty());
        assert_eq!(existing, vec![local]);
    }

    #[test]
    fn equal_versions_favor_incoming() {
        let local = quiz("Local title", 4);
        let id = local.id;
        let mut remote = quiz("Remote title", 4);
        remote.id = id;

        let mut existing = vec![local];
        reconcile(&mut existing, vec![remote]);

        assert_eq!(existing[0].title, "Remote title");
        assert_eq!(existing[0].version, 4);
    }

    #[test]
    fn unset_local_version_accepts_incoming() {
        let local = quiz("Local title", 0);
        let id = local.id;
        let mut remote = quiz("Remote title", 1);
        remote.id = id;

        let mut existing = vec![local];
        reconcile(&mut existing, vec![remote]);
        assert_eq!(existing[0].title, "Remote title");
    }

    #[test]
    fn unknown_record_is_inserted() {
        let remote = quiz("Brand new", 1);

        let mut existing = Vec::new();
        let report = reconcile(&mut existing, vec![remote.clone()]);

        assert_eq!(report.added, vec![remote.id]);
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].id, remote.id);
    }

    #[test]
    fn nil_id_is_assigned_fresh_identity() {
        let mut remote = quiz("Anonymous import", 1);
        remote.id = QuizId::nil();

        let mut existing = Vec::new();
        let report = reconcile(&mut existing, vec![remote]);

        assert_eq!(existing.len(), 1);
        assert!(!existing[0].id.is_nil());
        assert_eq!(report.added, vec![existing[0].id]);
    }

    #[test]
    fn unset_incoming_version_is_clamped_to_one() {
        let remote = quiz("Unversioned", 0);

        let mut existing = Vec::new();
        reconcile(&mut existing, vec![remote]);
        assert_eq!(existing[0].version, 1);
    }

    #[test]
    fn malformed_record_is_rejected_without_aborting_batch() {
        let good_a = quiz("First", 1);
        let bad = quiz("", 1); // empty title fails validation
        let good_b = quiz("Third", 1);

        let mut existing = Vec::new();
        let report = reconcile(&mut existing, vec![good_a, bad, good_b]);

        assert_eq!(existing.len(), 2);
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, 1);
    }

    #[test]
    fn records_absent_from_incoming_are_untouched() {
        let keeper = quiz("Keeper", 2);
        let keeper_id = keeper.id;

        let mut existing = vec![keeper];
        let report = reconcile(&mut existing, vec![quiz("Newcomer", 1)]);

        assert_eq!(existing.len(), 2);
        assert_eq!(existing[0].id, keeper_id);
        assert_eq!(existing[0].title, "Keeper");
        assert_eq!(report.added.len(), 1);
    }

    #[test]
    fn updated_records_retain_position_new_records_append_in_order() {
        let first = quiz("First", 1);
        let second = quiz("Second", 1);
        let second_id = second.id;

        let mut replacement = quiz("Second v2", 2);
        replacement.id = second_id;
        let new_a = quiz("Appended A", 1);
        let new_b = quiz("Appended B", 1);
        let (new_a_id, new_b_id) = (new_a.id, new_b.id);

        let mut existing = vec![first, second];
        reconcile(&mut existing, vec![new_a, replacement, new_b]);

        assert_eq!(existing.len(), 4);
        assert_eq!(existing[1].id, second_id);
        assert_eq!(existing[1].title, "Second v2");
        assert_eq!(existing[2].id, new_a_id);
        assert_eq!(existing[3].id, new_b_id);
    }

    #[test]
    fn merge_report_written_ids_and_changed() {
        let mut existing = Vec::new();
        let report = reconcile(&mut existing, vec![quiz("Only", 1)]);
        assert!(report.changed());
        assert_eq!(report.written_ids(), vec![existing[0].id]);

        let empty_report = reconcile(&mut existing, Vec::new());
        assert!(!empty_report.changed());
    }
}
