//! Quiz model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Attempt;

/// A unique identifier for a quiz, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizId(Uuid);

impl QuizId {
    /// Create a new unique quiz ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The nil ID, used by imports that carry no identity yet
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the nil placeholder ID
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for QuizId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuizId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text shown to the taker
    pub prompt: String,
    /// Answer choices; at least two
    pub choices: Vec<String>,
    /// Index into `choices` of the correct answer
    pub correct: usize,
    /// Optional illustration shown with the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A quiz in the system
///
/// `id` and `version` are the reconciliation metadata; everything else is
/// the content unit, replaced wholesale when a sync accepts an incoming
/// record. `version` is a positive counter bumped by exactly 1 on every
/// accepted edit; `0` means "unset" and only appears on foreign imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier, assigned once at creation
    #[serde(default = "QuizId::nil")]
    pub id: QuizId,
    /// Mutation counter, starts at 1
    #[serde(default)]
    pub version: u64,
    /// Quiz title
    pub title: String,
    /// Optional longer description
    #[serde(default)]
    pub description: String,
    /// Optional category label
    #[serde(default)]
    pub category: String,
    /// Per-question countdown in seconds
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u32,
    /// Whether the quiz is listed publicly
    #[serde(default)]
    pub public: bool,
    /// Optional password required to take the quiz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// The question list
    pub questions: Vec<Question>,
    /// Past scored attempts
    #[serde(default)]
    pub history: Vec<Attempt>,
    /// Creation timestamp (Unix ms); 0 when the source never recorded one
    #[serde(default)]
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    #[serde(default)]
    pub updated_at: i64,
}

const fn default_time_limit() -> u32 {
    30
}

impl Quiz {
    /// Create a new quiz with the given title and questions, at version 1
    #[must_use]
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: QuizId::new(),
            version: 1,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            time_limit_secs: default_time_limit(),
            public: false,
            password: None,
            questions,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a content mutation: bump the version and touch `updated_at`
    pub fn touch(&mut self) {
        self.version = self.version.saturating_add(1);
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Replace this quiz's content with another record's, adopting its
    /// version (clamped to at least 1). Identity is kept.
    pub fn adopt(&mut self, incoming: Self) {
        let id = self.id;
        *self = incoming;
        self.id = id;
        self.version = self.version.max(1);
    }

    /// Check the record carries the content reconciliation requires
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::RecordValidation("title must not be empty".into()));
        }
        if self.questions.is_empty() {
            return Err(Error::RecordValidation(
                "quiz must have at least one question".into(),
            ));
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(Error::RecordValidation(format!(
                    "question {index} has an empty prompt"
                )));
            }
            if question.choices.len() < 2 {
                return Err(Error::RecordValidation(format!(
                    "question {index} needs at least two choices"
                )));
            }
            if question.correct >= question.choices.len() {
                return Err(Error::RecordValidation(format!(
                    "question {index} marks choice {} correct but has only {} choices",
                    question.correct,
                    question.choices.len()
                )));
            }
        }
        Ok(())
    }

    /// Whether taking this quiz requires a password
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}
