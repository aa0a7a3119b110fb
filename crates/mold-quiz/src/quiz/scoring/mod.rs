mod policy;
mod rules;

pub use policy::classify;

use serde::{Deserialize, Serialize};

use super::domain::AnswerStore;
use super::profiles::ProfileId;

/// Upper bound of the clamped total score.
pub const MAX_SCORE: u8 = 10;

/// Stateless evaluator applying the fixed assessment rubric.
///
/// The weights are deliberately hardcoded in [`rules`]: per-option `points`
/// in the question bank are reserved data and never consulted here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score an answer store and classify the result. Total over any input:
    /// missing or empty answers contribute zero to their factor.
    pub fn evaluate(&self, answers: &AnswerStore) -> QuizOutcome {
        let (components, score) = rules::score_answers(answers);
        let profile = policy::classify(score);

        QuizOutcome {
            score,
            profile,
            components,
        }
    }
}

/// Discrete contribution of one question group, allowing transparent result
/// breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u8,
    pub notes: String,
}

/// Question groups the rubric draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    NeurologicalSymptoms,
    PhysicalSymptoms,
    EnvironmentalExposure,
    SymptomTimeline,
    DoctorExperience,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NeurologicalSymptoms => "Neurological symptoms",
            Self::PhysicalSymptoms => "Physical symptoms",
            Self::EnvironmentalExposure => "Environmental exposure",
            Self::SymptomTimeline => "Symptom timeline",
            Self::DoctorExperience => "Doctor experience",
        }
    }
}

/// Evaluation output: the clamped score, the assigned profile, and the
/// per-factor trail that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub score: u8,
    pub profile: ProfileId,
    pub components: Vec<ScoreComponent>,
}
