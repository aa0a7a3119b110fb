use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bank::QuestionBank;
use super::domain::{QuizSessionStatus, SessionId};
use super::profiles::{Profile, ProfileCatalog, ProfileId};
use super::scoring::ScoreComponent;
use super::wizard::{WizardSession, WizardStep};

/// Repository record pairing a session's state machine with its lifecycle
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub session: WizardSession,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn status(&self) -> QuizSessionStatus {
        if self.session.completed() {
            QuizSessionStatus::Completed
        } else {
            QuizSessionStatus::InProgress
        }
    }

    /// Sanitized progress snapshot for API responses. Contact details are
    /// never exposed here.
    pub fn status_view(&self, bank: &QuestionBank) -> SessionStatusView {
        let step = self.session.current_step(bank);
        let question_number = match step {
            WizardStep::Question(number) => Some(number),
            _ => None,
        };

        SessionStatusView {
            session_id: self.session_id.clone(),
            status: self.status().label(),
            step_index: self.session.step_index(),
            step: step.label(),
            question_number,
            answered_questions: self.session.answers().answered_count(),
            can_advance: self.session.can_advance(bank),
            can_go_back: self.session.can_go_back(),
            score: self.session.outcome().map(|outcome| outcome.score),
            profile: self.session.outcome().map(|outcome| outcome.profile),
        }
    }

    /// Full results payload, available only once the session is completed.
    pub fn result_view(&self, catalog: &ProfileCatalog) -> Option<QuizResultView> {
        let outcome = self.session.outcome()?;
        Some(QuizResultView {
            session_id: self.session_id.clone(),
            score: outcome.score,
            profile: outcome.profile,
            components: outcome.components.clone(),
            guidance: catalog.get(outcome.profile).cloned(),
        })
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    fn completed(&self, limit: usize) -> Result<Vec<SessionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound transport for the contact-capture submission. The production
/// email endpoint sits behind this seam; tests and the demo record in memory.
pub trait ContactNotifier: Send + Sync {
    fn deliver(&self, submission: ContactSubmission) -> Result<(), NotifyError>;
}

/// Payload handed to the notifier once a session completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub session_id: SessionId,
    pub email: String,
    pub name: String,
    pub score: u8,
    pub profile: ProfileId,
}

/// Contact delivery error. Transport failures are retriable: the session
/// stays un-completed so the same submission can be attempted again.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("contact transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a session's exposed progress.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusView {
    pub session_id: SessionId,
    pub status: &'static str,
    pub step_index: usize,
    pub step: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_number: Option<usize>,
    pub answered_questions: usize,
    pub can_advance: bool,
    pub can_go_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileId>,
}

/// Results payload joining the outcome with the profile catalog copy.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResultView {
    pub session_id: SessionId,
    pub score: u8,
    pub profile: ProfileId,
    pub components: Vec<ScoreComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<Profile>,
}
