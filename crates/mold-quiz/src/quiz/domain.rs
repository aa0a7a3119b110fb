use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Selection mode declared by a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    SingleSelect,
    MultiSelect,
}

impl SelectionMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
        }
    }
}

/// One selectable option within a question. `value` is the canonical token
/// recorded in the answer store; `points` is a reserved weighting hook that
/// the scoring rules deliberately do not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub id: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u8>,
}

/// Question definition as presented by the wizard. Bank order determines
/// presentation order and step numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub mode: SelectionMode,
    pub options: Vec<AnswerOption>,
    pub required: bool,
}

impl Question {
    /// Whether `value` is the canonical token of one of this question's
    /// options.
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// Recorded selection for one question, tagged by the declared selection mode
/// so no runtime shape inspection is needed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Single(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Number of selected values.
    pub fn selections(&self) -> usize {
        match self {
            Answer::Single(_) => 1,
            Answer::Multi(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Single(value) => value.is_empty(),
            Answer::Multi(values) => values.is_empty(),
        }
    }

    /// Whether this answer shape matches the question's declared mode.
    pub fn matches(&self, mode: SelectionMode) -> bool {
        matches!(
            (self, mode),
            (Answer::Single(_), SelectionMode::SingleSelect)
                | (Answer::Multi(_), SelectionMode::MultiSelect)
        )
    }
}

/// Per-session mapping from question id to the recorded selection(s).
///
/// Entries are upserted as each question is answered; re-recording a question
/// replaces the prior value. The store only ever holds non-empty selections:
/// questions never visited have no entry, and recording an empty selection
/// removes any prior entry, so the scoring rules treat both the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    entries: BTreeMap<String, Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the answer for a question, replacing any prior value. An empty
    /// selection drops the entry instead, returning the question to its
    /// unanswered state.
    pub fn record(&mut self, question_id: &str, answer: Answer) {
        if answer.is_empty() {
            self.entries.remove(question_id);
        } else {
            self.entries.insert(question_id.to_string(), answer);
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.entries.get(question_id)
    }

    /// The single-select token for a question, if one is recorded.
    pub fn single(&self, question_id: &str) -> Option<&str> {
        match self.entries.get(question_id) {
            Some(Answer::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Count of selected values for a question; absent entries count zero.
    pub fn selection_count(&self, question_id: &str) -> usize {
        self.entries
            .get(question_id)
            .map(Answer::selections)
            .unwrap_or(0)
    }

    /// True when the question holds a non-empty selection.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.entries
            .get(question_id)
            .map(|answer| !answer.is_empty())
            .unwrap_or(false)
    }

    /// Number of questions with a non-empty selection.
    pub fn answered_count(&self) -> usize {
        self.entries
            .values()
            .filter(|answer| !answer.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries
            .iter()
            .map(|(question_id, answer)| (question_id.as_str(), answer))
    }
}

/// Lifecycle status of a session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizSessionStatus {
    InProgress,
    Completed,
}

impl QuizSessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}
