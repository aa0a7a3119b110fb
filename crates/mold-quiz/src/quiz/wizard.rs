use serde::{Deserialize, Serialize};

use super::bank::QuestionBank;
use super::domain::{Answer, AnswerStore, SelectionMode};
use super::scoring::{QuizOutcome, ScoringEngine};

/// Resolved view of the session's position in the flow. The final step index
/// is shared by contact capture and results; completion decides which one the
/// session is actually on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Intro,
    /// One-based question number, matching presentation order in the bank.
    Question(usize),
    ContactCapture,
    Results,
}

impl WizardStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Question(_) => "question",
            Self::ContactCapture => "contact_capture",
            Self::Results => "results",
        }
    }
}

/// Contact details captured immediately before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub name: String,
}

/// Session state machine for one assessment run.
///
/// Steps run strictly linearly: intro, one step per bank question, then a
/// shared final step that is contact capture until submission and results
/// afterwards. The session owns its answer store exclusively; the question
/// bank is passed into each operation rather than held, so callers control
/// which bank a session is validated against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    step: usize,
    answers: AnswerStore,
    contact: Option<ContactDetails>,
    outcome: Option<QuizOutcome>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the final (contact/results) step for the given bank.
    pub fn last_step(bank: &QuestionBank) -> usize {
        bank.len() + 1
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn current_step(&self, bank: &QuestionBank) -> WizardStep {
        if self.step == 0 {
            WizardStep::Intro
        } else if self.step <= bank.len() {
            WizardStep::Question(self.step)
        } else if self.completed() {
            WizardStep::Results
        } else {
            WizardStep::ContactCapture
        }
    }

    /// Advance one step, capped at the final step. The controller performs no
    /// validation here; renderers gate their own Next control on
    /// [`Self::can_advance`].
    pub fn next(&mut self, bank: &QuestionBank) {
        self.step = (self.step + 1).min(Self::last_step(bank));
    }

    /// Go back one step, floored at the intro.
    pub fn previous(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Back-navigation is not offered on the intro or the first question, so
    /// leaving the flow always passes back through the intro confirmation.
    pub fn can_go_back(&self) -> bool {
        self.step >= 2 && !self.completed()
    }

    /// Whether the current step's question holds a non-empty selection. The
    /// intro is always passable; the final step has no forward transition.
    pub fn can_advance(&self, bank: &QuestionBank) -> bool {
        match self.current_step(bank) {
            WizardStep::Intro => true,
            WizardStep::Question(number) => bank
                .questions()
                .get(number - 1)
                .map(|question| self.answers.is_answered(question.id))
                .unwrap_or(false),
            WizardStep::ContactCapture | WizardStep::Results => false,
        }
    }

    /// Upsert an answer. Re-recording a question replaces the prior value;
    /// the shape must match the question's declared selection mode and every
    /// selected value must name one of the question's options. Repeated
    /// multi-select values collapse to a single selection so the count-based
    /// scoring rules see each option at most once.
    pub fn record_answer(
        &mut self,
        bank: &QuestionBank,
        question_id: &str,
        answer: Answer,
    ) -> Result<(), WizardError> {
        if self.completed() {
            return Err(WizardError::AlreadyCompleted);
        }
        let question = bank
            .question(question_id)
            .ok_or_else(|| WizardError::UnknownQuestion(question_id.to_string()))?;
        if !answer.matches(question.mode) {
            return Err(WizardError::SelectionMismatch {
                question: question_id.to_string(),
                expected: question.mode.label(),
            });
        }

        let answer = match answer {
            Answer::Single(value) => {
                if !question.has_option_value(&value) {
                    return Err(WizardError::UnknownOption {
                        question: question_id.to_string(),
                        value,
                    });
                }
                Answer::Single(value)
            }
            Answer::Multi(values) => {
                let mut selected = Vec::with_capacity(values.len());
                for value in values {
                    if !question.has_option_value(&value) {
                        return Err(WizardError::UnknownOption {
                            question: question_id.to_string(),
                            value,
                        });
                    }
                    if !selected.contains(&value) {
                        selected.push(value);
                    }
                }
                Answer::Multi(selected)
            }
        };

        self.answers.record(question_id, answer);
        Ok(())
    }

    /// Toggle one option: membership toggle for multi-select, replacement for
    /// single-select. Deselecting the last multi-select value drops the
    /// question's entry, returning it to the unanswered state.
    pub fn toggle(
        &mut self,
        bank: &QuestionBank,
        question_id: &str,
        value: &str,
    ) -> Result<(), WizardError> {
        if self.completed() {
            return Err(WizardError::AlreadyCompleted);
        }
        let question = bank
            .question(question_id)
            .ok_or_else(|| WizardError::UnknownQuestion(question_id.to_string()))?;
        if !question.has_option_value(value) {
            return Err(WizardError::UnknownOption {
                question: question_id.to_string(),
                value: value.to_string(),
            });
        }

        let answer = match question.mode {
            SelectionMode::SingleSelect => Answer::Single(value.to_string()),
            SelectionMode::MultiSelect => {
                let mut values = match self.answers.get(question_id) {
                    Some(Answer::Multi(existing)) => existing.clone(),
                    _ => Vec::new(),
                };
                match values.iter().position(|existing| existing == value) {
                    Some(index) => {
                        values.remove(index);
                    }
                    None => values.push(value.to_string()),
                }
                Answer::Multi(values)
            }
        };

        self.answers.record(question_id, answer);
        Ok(())
    }

    /// Capture contact details, score the recorded answers, and move the
    /// session to the results step. Callable once per session; skipped
    /// questions simply contribute zero to the score.
    pub fn submit_contact(
        &mut self,
        bank: &QuestionBank,
        engine: &ScoringEngine,
        email: &str,
        name: &str,
    ) -> Result<&QuizOutcome, WizardError> {
        if self.completed() {
            return Err(WizardError::AlreadyCompleted);
        }
        if email.trim().is_empty() || name.trim().is_empty() {
            return Err(WizardError::MissingContact);
        }

        self.contact = Some(ContactDetails {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
        });
        self.step = Self::last_step(bank);

        Ok(self.outcome.insert(engine.evaluate(&self.answers)))
    }

    /// Terminal once the contact submission has scored the session.
    pub fn completed(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn contact(&self) -> Option<&ContactDetails> {
        self.contact.as_ref()
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }
}

/// Error raised by wizard operations.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{question}' expects a {expected} answer")]
    SelectionMismatch {
        question: String,
        expected: &'static str,
    },
    #[error("question '{question}' has no option '{value}'")]
    UnknownOption { question: String, value: String },
    #[error("session is already completed")]
    AlreadyCompleted,
    #[error("contact email and name are required")]
    MissingContact,
}
