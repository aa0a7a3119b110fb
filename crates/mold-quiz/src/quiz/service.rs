use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::bank::QuestionBank;
use super::domain::{Answer, SessionId};
use super::profiles::ProfileCatalog;
use super::repository::{
    ContactNotifier, ContactSubmission, NotifyError, RepositoryError, SessionRecord,
    SessionRepository,
};
use super::scoring::{QuizOutcome, ScoringEngine};
use super::wizard::{WizardError, WizardSession};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("quiz-{id:06}"))
}

/// Service composing the question bank, profile catalog, and scoring engine
/// over the repository and notifier seams. One instance serves all sessions;
/// each session's state lives in its repository record.
pub struct QuizSessionService<R, N> {
    bank: Arc<QuestionBank>,
    catalog: Arc<ProfileCatalog>,
    engine: ScoringEngine,
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> QuizSessionService<R, N>
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    pub fn new(
        bank: Arc<QuestionBank>,
        catalog: Arc<ProfileCatalog>,
        repository: Arc<R>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            bank,
            catalog,
            engine: ScoringEngine::new(),
            repository,
            notifier,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    /// Start a fresh session at the intro step.
    pub fn create(&self) -> Result<SessionRecord, QuizServiceError> {
        let record = SessionRecord {
            session_id: next_session_id(),
            session: WizardSession::new(),
            started_at: Utc::now(),
            completed_at: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, QuizServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Upsert an answer for one question and persist the session.
    pub fn record_answer(
        &self,
        session_id: &SessionId,
        question_id: &str,
        answer: Answer,
    ) -> Result<SessionRecord, QuizServiceError> {
        let mut record = self.get(session_id)?;
        record.session.record_answer(&self.bank, question_id, answer)?;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Toggle a single option for one question and persist the session.
    pub fn toggle(
        &self,
        session_id: &SessionId,
        question_id: &str,
        value: &str,
    ) -> Result<SessionRecord, QuizServiceError> {
        let mut record = self.get(session_id)?;
        record.session.toggle(&self.bank, question_id, value)?;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn advance(&self, session_id: &SessionId) -> Result<SessionRecord, QuizServiceError> {
        let mut record = self.get(session_id)?;
        record.session.next(&self.bank);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn back(&self, session_id: &SessionId) -> Result<SessionRecord, QuizServiceError> {
        let mut record = self.get(session_id)?;
        record.session.previous();
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Capture contact details, score the session, and deliver the contact
    /// submission. The completed state is persisted only after delivery
    /// succeeds, so a transport failure leaves the session intact for retry.
    pub fn submit_contact(
        &self,
        session_id: &SessionId,
        email: &str,
        name: &str,
    ) -> Result<(SessionRecord, QuizOutcome), QuizServiceError> {
        let mut record = self.get(session_id)?;
        let outcome = record
            .session
            .submit_contact(&self.bank, &self.engine, email, name)?
            .clone();

        self.notifier.deliver(ContactSubmission {
            session_id: record.session_id.clone(),
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            score: outcome.score,
            profile: outcome.profile,
        })?;

        record.completed_at = Some(Utc::now());
        self.repository.update(record.clone())?;

        tracing::info!(
            session = %record.session_id.0,
            score = outcome.score,
            profile = outcome.profile.label(),
            "assessment completed"
        );

        Ok((record, outcome))
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
