//! Mold exposure self-assessment: question bank, wizard session flow,
//! scoring rubric, profile classification, and the HTTP surface over them.

pub mod bank;
pub mod domain;
pub mod profiles;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use bank::{QuestionBank, QuestionBankError};
pub use domain::{
    Answer, AnswerOption, AnswerStore, Question, QuizSessionStatus, SelectionMode, SessionId,
};
pub use profiles::{NextSteps, Profile, ProfileCatalog, ProfileId};
pub use repository::{
    ContactNotifier, ContactSubmission, NotifyError, QuizResultView, RepositoryError,
    SessionRecord, SessionRepository, SessionStatusView,
};
pub use router::quiz_router;
pub use scoring::{classify, QuizOutcome, ScoreComponent, ScoreFactor, ScoringEngine, MAX_SCORE};
pub use service::{QuizServiceError, QuizSessionService};
pub use wizard::{ContactDetails, WizardError, WizardSession, WizardStep};
