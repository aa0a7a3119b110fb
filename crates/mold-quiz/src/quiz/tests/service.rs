use std::sync::Arc;

use super::common::*;
use crate::quiz::bank::{DOCTOR_EXPERIENCE, SYMPTOMS_NEURO};
use crate::quiz::domain::QuizSessionStatus;
use crate::quiz::profiles::ProfileId;
use crate::quiz::repository::{RepositoryError, SessionRepository};
use crate::quiz::service::{QuizServiceError, QuizSessionService};
use crate::quiz::wizard::WizardError;

#[test]
fn create_persists_a_fresh_session() {
    let (service, repository, _) = build_service();
    let record = service.create().expect("session created");

    assert_eq!(record.status(), QuizSessionStatus::InProgress);
    assert!(record.completed_at.is_none());
    let stored = repository
        .fetch(&record.session_id)
        .expect("fetch")
        .expect("record present");
    assert_eq!(stored.session_id, record.session_id);
}

#[test]
fn session_ids_are_unique_per_creation() {
    let (service, _, _) = build_service();
    let first = service.create().expect("first");
    let second = service.create().expect("second");
    assert_ne!(first.session_id, second.session_id);
}

#[test]
fn recorded_answers_survive_a_round_trip() {
    let (service, _, _) = build_service();
    let record = service.create().expect("created");

    service
        .record_answer(
            &record.session_id,
            SYMPTOMS_NEURO,
            multi(&["brain-fog", "dizziness"]),
        )
        .expect("answer recorded");

    let fetched = service.get(&record.session_id).expect("fetched");
    assert_eq!(fetched.session.answers().selection_count(SYMPTOMS_NEURO), 2);
}

#[test]
fn unknown_question_maps_to_a_wizard_error() {
    let (service, _, _) = build_service();
    let record = service.create().expect("created");

    match service.record_answer(&record.session_id, "favorite-color", single("blue")) {
        Err(QuizServiceError::Wizard(WizardError::UnknownQuestion(_))) => {}
        other => panic!("expected wizard error, got {other:?}"),
    }
}

#[test]
fn contact_submission_completes_and_notifies() {
    let (service, _, notifier) = build_service();
    let record = service.create().expect("created");
    for (question_id, answer) in strong_answers().iter() {
        service
            .record_answer(&record.session_id, question_id, answer.clone())
            .expect("answer recorded");
    }

    let (stored, outcome) = service
        .submit_contact(&record.session_id, "sam@example.com", "Sam")
        .expect("submission succeeds");

    assert_eq!(outcome.score, 10);
    assert_eq!(outcome.profile, ProfileId::Investigator);
    assert_eq!(stored.status(), QuizSessionStatus::Completed);
    assert!(stored.completed_at.is_some());

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].email, "sam@example.com");
    assert_eq!(events[0].score, 10);
    assert_eq!(events[0].profile, ProfileId::Investigator);
}

#[test]
fn notifier_failure_leaves_the_session_retriable() {
    let repository = Arc::new(MemoryRepository::default());
    let service = QuizSessionService::new(
        bank(),
        catalog(),
        repository.clone(),
        Arc::new(FailingNotifier),
    );
    let record = service.create().expect("created");
    service
        .record_answer(&record.session_id, DOCTOR_EXPERIENCE, single("no-doctor"))
        .expect("answer recorded");

    match service.submit_contact(&record.session_id, "sam@example.com", "Sam") {
        Err(QuizServiceError::Notify(_)) => {}
        other => panic!("expected notify error, got {other:?}"),
    }

    // Nothing was persisted as completed, so the same submission can retry.
    let stored = repository
        .fetch(&record.session_id)
        .expect("fetch")
        .expect("record present");
    assert_eq!(stored.status(), QuizSessionStatus::InProgress);
    assert!(stored.completed_at.is_none());
}

#[test]
fn repeat_submission_is_rejected() {
    let (service, _, notifier) = build_service();
    let record = service.create().expect("created");
    service
        .submit_contact(&record.session_id, "sam@example.com", "Sam")
        .expect("first submission");

    match service.submit_contact(&record.session_id, "sam@example.com", "Sam") {
        Err(QuizServiceError::Wizard(WizardError::AlreadyCompleted)) => {}
        other => panic!("expected already-completed error, got {other:?}"),
    }
    assert_eq!(notifier.events().len(), 1, "no duplicate delivery");
}

#[test]
fn missing_session_maps_to_not_found() {
    let (service, _, _) = build_service();
    match service.get(&crate::quiz::domain::SessionId("quiz-missing".to_string())) {
        Err(QuizServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[test]
fn unavailable_repository_propagates() {
    let service = QuizSessionService::new(
        bank(),
        catalog(),
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
    );

    match service.create() {
        Err(QuizServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable error, got {other:?}"),
    }
}

#[test]
fn advance_and_back_persist_step_changes() {
    let (service, _, _) = build_service();
    let record = service.create().expect("created");

    let advanced = service.advance(&record.session_id).expect("advance");
    assert_eq!(advanced.session.step_index(), 1);

    let advanced = service.advance(&record.session_id).expect("advance");
    assert_eq!(advanced.session.step_index(), 2);

    let back = service.back(&record.session_id).expect("back");
    assert_eq!(back.session.step_index(), 1);
}

#[test]
fn completed_sessions_are_listable() {
    let (service, repository, _) = build_service();
    let record = service.create().expect("created");
    service.create().expect("second session stays in progress");
    service
        .submit_contact(&record.session_id, "sam@example.com", "Sam")
        .expect("submission");

    let completed = repository.completed(10).expect("listing");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].session_id, record.session_id);
}
