use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::quiz::bank::{
    QuestionBank, DOCTOR_EXPERIENCE, ENVIRONMENTAL, SYMPTOMS_NEURO, SYMPTOMS_PHYSICAL, TIMELINE,
};
use crate::quiz::domain::{Answer, AnswerStore, SessionId};
use crate::quiz::profiles::ProfileCatalog;
use crate::quiz::repository::{
    ContactNotifier, ContactSubmission, NotifyError, RepositoryError, SessionRecord,
    SessionRepository,
};
use crate::quiz::router::quiz_router;
use crate::quiz::scoring::ScoringEngine;
use crate::quiz::service::QuizSessionService;

pub(super) fn bank() -> Arc<QuestionBank> {
    Arc::new(QuestionBank::standard())
}

pub(super) fn catalog() -> Arc<ProfileCatalog> {
    Arc::new(ProfileCatalog::standard())
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new()
}

pub(super) fn single(value: &str) -> Answer {
    Answer::Single(value.to_string())
}

pub(super) fn multi(values: &[&str]) -> Answer {
    Answer::Multi(values.iter().map(|value| value.to_string()).collect())
}

/// Scenario with a strong exposure signal: raw subscores 2+0+4+3+4 = 13,
/// clamped to 10.
pub(super) fn strong_answers() -> AnswerStore {
    let mut answers = AnswerStore::new();
    answers.record(SYMPTOMS_NEURO, multi(&["brain-fog", "chronic-fatigue"]));
    answers.record(SYMPTOMS_PHYSICAL, multi(&[]));
    answers.record(ENVIRONMENTAL, multi(&["musty-smell", "visible-mold"]));
    answers.record(TIMELINE, single("after-move"));
    answers.record(DOCTOR_EXPERIENCE, single("normal-labs"));
    answers
}

/// Scenario with almost no signal: only the doctor question answered.
pub(super) fn minimal_answers() -> AnswerStore {
    let mut answers = AnswerStore::new();
    answers.record(DOCTOR_EXPERIENCE, single("no-doctor"));
    answers
}

pub(super) fn build_service() -> (
    QuizSessionService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = QuizSessionService::new(bank(), catalog(), repository.clone(), notifier.clone());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn completed(&self, limit: usize) -> Result<Vec<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.session.completed())
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<ContactSubmission>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<ContactSubmission> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ContactNotifier for MemoryNotifier {
    fn deliver(&self, submission: ContactSubmission) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(submission);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl ContactNotifier for FailingNotifier {
    fn deliver(&self, _submission: ContactSubmission) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn completed(&self, _limit: usize) -> Result<Vec<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn quiz_router_with_service(
    service: QuizSessionService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    quiz_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
