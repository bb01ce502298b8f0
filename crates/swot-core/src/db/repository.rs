//! Quiz store implementations

use rusqlite::params;
use std::path::Path;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Quiz, QuizId};
use crate::reconcile::{reconcile, MergeReport};

/// Trait for quiz storage operations
pub trait QuizStore {
    /// List all quizzes in insertion order
    fn list(&self) -> Result<Vec<Quiz>>;

    /// Get a quiz by ID
    fn get(&self, id: &QuizId) -> Result<Option<Quiz>>;

    /// Insert or replace a quiz keyed by its ID
    fn upsert(&mut self, quiz: &Quiz) -> Result<()>;

    /// Remove a quiz entirely (no tombstone)
    fn delete(&mut self, id: &QuizId) -> Result<()>;
}

/// Merge `incoming` into the store with last-write-wins semantics.
///
/// Loads the collection, reconciles, and writes back each added or
/// updated record individually. Returns the merged collection alongside
/// the merge report.
pub fn sync_into<S: QuizStore + ?Sized>(
    store: &mut S,
    incoming: Vec<Quiz>,
) -> Result<(Vec<Quiz>, MergeReport)> {
    let mut collection = store.list()?;
    let report = reconcile(&mut collection, incoming);

    for id in report.written_ids() {
        if let Some(quiz) = collection.iter().find(|quiz| quiz.id == id) {
            store.upsert(quiz)?;
        }
    }

    Ok((collection, report))
}

/// `SQLite` implementation of `QuizStore`
///
/// The content unit is stored as one JSON column; `id`, `version`, and
/// `updated_at` are mirrored into columns for keying and ordering.
pub struct SqliteQuizStore {
    db: Database,
}

impl SqliteQuizStore {
    /// Open a store backed by the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Open a store backed by an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    fn parse_quiz(content: &str) -> Result<Quiz> {
        Ok(serde_json::from_str(content)?)
    }
}

impl QuizStore for SqliteQuizStore {
    fn list(&self) -> Result<Vec<Quiz>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT content FROM quizzes ORDER BY rowid")?;

        let contents = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        contents
            .iter()
            .map(|content| Self::parse_quiz(content))
            .collect()
    }

    fn get(&self, id: &QuizId) -> Result<Option<Quiz>> {
        let result = self.db.connection().query_row(
            "SELECT content FROM quizzes WHERE id = ?",
            params![id.as_str()],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(content) => Ok(Some(Self::parse_quiz(&content)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn upsert(&mut self, quiz: &Quiz) -> Result<()> {
        let content = serde_json::to_string(quiz)?;

        // ON CONFLICT keeps the rowid, so updated quizzes retain their
        // position in list order.
        self.db.connection().execute(
            "INSERT INTO quizzes (id, version, content, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 version = excluded.version,
                 content = excluded.content,
                 updated_at = excluded.updated_at",
            params![
                quiz.id.as_str(),
                i64::try_from(quiz.version).unwrap_or(i64::MAX),
                content,
                quiz.updated_at
            ],
        )?;

        Ok(())
    }

    fn delete(&mut self, id: &QuizId) -> Result<()> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM quizzes WHERE id = ?", params![id.as_str()])?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;
    use pretty_assertions::assert_eq;

    fn sample_quiz(title: &str) -> Quiz {
        Quiz::new(
            title,
            vec![Question {
                prompt: "Pick one".to_string(),
                choices: vec!["a".to_string(), "b".to_string()],
                correct: 0,
                image_url: None,
            }],
        )
    }

    fn setup() -> SqliteQuizStore {
        SqliteQuizStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let mut store = setup();
        let quiz = sample_quiz("Round trip");

        store.upsert(&quiz).unwrap();
        let fetched = store.get(&quiz.id).unwrap().unwrap();
        assert_eq!(fetched, quiz);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = setup();
        assert_eq!(store.get(&QuizId::new()).unwrap(), None);
    }

    #[test]
    fn test_list_preserves_insertion_order_across_updates() {
        let mut store = setup();
        let first = sample_quiz("First");
        let mut second = sample_quiz("Second");

        store.upsert(&first).unwrap();
        store.upsert(&second).unwrap();

        second.title = "Second, edited".to_string();
        second.touch();
        store.upsert(&second).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].title, "Second, edited");
        assert_eq!(listed[1].version, 2);
    }

    #[test]
    fn test_delete_removes_row() {
        let mut store = setup();
        let quiz = sample_quiz("To delete");

        store.upsert(&quiz).unwrap();
        store.delete(&quiz.id).unwrap();

        assert_eq!(store.get(&quiz.id).unwrap(), None);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let mut store = setup();
        let error = store.delete(&QuizId::new()).unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[test]
    fn test_sync_into_writes_back_merged_records() {
        let mut store = setup();
        let stale = sample_quiz("Server copy");
        store.upsert(&stale).unwrap();

        let mut newer = stale.clone();
        newer.title = "Device copy".to_string();
        newer.version = stale.version + 1;
        let fresh = sample_quiz("Brand new");

        let (merged, report) = sync_into(&mut store, vec![newer, fresh.clone()]).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(report.updated, vec![stale.id]);
        assert_eq!(report.added, vec![fresh.id]);

        let stored = store.get(&stale.id).unwrap().unwrap();
        assert_eq!(stored.title, "Device copy");
        assert_eq!(store.get(&fresh.id).unwrap().unwrap(), fresh);
    }

    #[test]
    fn test_sync_into_leaves_stale_incoming_unwritten() {
        let mut store = setup();
        let mut current = sample_quiz("Current");
        current.version = 5;
        store.upsert(&current).unwrap();

        let mut stale = current.clone();
        stale.title = "Old edit".to_string();
        stale.version = 3;

        let (_, report) = sync_into(&mut store, vec![stale]).unwrap();

        assert!(report.updated.is_empty());
        assert_eq!(report.skipped_stale, vec![current.id]);
        assert_eq!(store.get(&current.id).unwrap().unwrap().title, "Current");
    }
}
