use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use mold_quiz::quiz::{
    ContactNotifier, ContactSubmission, NotifyError, RepositoryError, SessionId, SessionRecord,
    SessionRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for InMemorySessionRepository {
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
        if guard.contains_key(&record.session_id) {
            guard.insert(record.session_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

/// Stand-in for the real outreach integration: contact submissions are held in
/// memory so the demo and tests can inspect what would have been delivered.
#[derive(Default, Clone)]
pub(crate) struct RecordingContactNotifier {
    events: Arc<Mutex<Vec<ContactSubmission>>>,
}

impl ContactNotifier for RecordingContactNotifier {
    fn deliver(&self, submission: ContactSubmission) -> Result<(), NotifyError> {
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(submission);
        Ok(())
    }
}

impl RecordingContactNotifier {
    pub(crate) fn events(&self) -> Vec<ContactSubmission> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}
