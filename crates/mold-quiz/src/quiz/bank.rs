use super::domain::{Answer, AnswerOption, AnswerStore, Question, SelectionMode};

/// Question ids referenced by the scoring rules.
pub const SYMPTOMS_NEURO: &str = "symptoms-neuro";
pub const SYMPTOMS_PHYSICAL: &str = "symptoms-physical";
pub const ENVIRONMENTAL: &str = "environmental";
pub const TIMELINE: &str = "timeline";
pub const DOCTOR_EXPERIENCE: &str = "doctor-experience";

/// Ordered, immutable catalog of assessment questions.
///
/// The bank is constructed once and passed explicitly into the wizard and
/// service so tests can substitute alternate banks; nothing in the crate
/// reaches for it through global state.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// The production question set for the mold exposure self-assessment.
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    /// Build a bank from custom questions, enforcing the structural
    /// invariants the wizard relies on.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        for (index, question) in questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(QuestionBankError::EmptyOptions(question.id.to_string()));
            }
            if questions[..index].iter().any(|prior| prior.id == question.id) {
                return Err(QuestionBankError::DuplicateQuestion(question.id.to_string()));
            }
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    /// Zero-based position of a question in presentation order.
    pub fn position(&self, question_id: &str) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.id == question_id)
    }

    /// Build an answer store from a raw answer map, for scoring input that
    /// did not pass through a wizard session. Unknown questions, answers
    /// whose shape does not match the question's mode, and unknown option
    /// values are dropped; repeated multi-select values collapse to one.
    pub fn sanitized_store(
        &self,
        entries: impl IntoIterator<Item = (String, Answer)>,
    ) -> AnswerStore {
        let mut store = AnswerStore::new();
        for (question_id, answer) in entries {
            let question = match self.question(&question_id) {
                Some(question) => question,
                None => continue,
            };
            if !answer.matches(question.mode) {
                continue;
            }
            let answer = match answer {
                Answer::Single(value) => {
                    if !question.has_option_value(&value) {
                        continue;
                    }
                    Answer::Single(value)
                }
                Answer::Multi(values) => {
                    let mut selected = Vec::with_capacity(values.len());
                    for value in values {
                        if question.has_option_value(&value) && !selected.contains(&value) {
                            selected.push(value);
                        }
                    }
                    Answer::Multi(selected)
                }
            };
            store.record(&question_id, answer);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("question '{0}' declared more than once")]
    DuplicateQuestion(String),
    #[error("question '{0}' has no options")]
    EmptyOptions(String),
}

fn multi(id: &'static str, label: &'static str, value: &'static str) -> AnswerOption {
    AnswerOption {
        id,
        label,
        value,
        points: Some(1),
    }
}

fn single(id: &'static str, label: &'static str, value: &'static str) -> AnswerOption {
    AnswerOption {
        id,
        label,
        value,
        points: None,
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: SYMPTOMS_NEURO,
            title: "Which of these cognitive or energy symptoms do you experience?",
            description: Some("Select everything that applies, even if it comes and goes."),
            mode: SelectionMode::MultiSelect,
            options: vec![
                multi("neuro-brain-fog", "Brain fog or trouble concentrating", "brain-fog"),
                multi("neuro-fatigue", "Chronic fatigue that rest doesn't fix", "chronic-fatigue"),
                multi("neuro-headaches", "Frequent headaches or migraines", "headaches"),
                multi("neuro-memory", "Short-term memory issues", "memory-issues"),
                multi("neuro-mood", "Mood changes, anxiety, or irritability", "mood-changes"),
                multi("neuro-dizziness", "Dizziness or lightheadedness", "dizziness"),
                multi("neuro-sleep", "Unrefreshing or disrupted sleep", "sleep-issues"),
            ],
            required: false,
        },
        Question {
            id: SYMPTOMS_PHYSICAL,
            title: "Which physical symptoms do you experience?",
            description: Some("Select everything that applies."),
            mode: SelectionMode::MultiSelect,
            options: vec![
                multi("phys-sinus", "Sinus congestion or frequent infections", "sinus-congestion"),
                multi("phys-skin", "Skin rashes or unusual sensitivity", "skin-rashes"),
                multi("phys-joints", "Joint pain or morning stiffness", "joint-pain"),
                multi("phys-breath", "Shortness of breath or chest tightness", "shortness-of-breath"),
                multi("phys-digestion", "Digestive issues or food sensitivities", "digestive-issues"),
                multi("phys-eyes", "Red, itchy, or watery eyes", "eye-irritation"),
            ],
            required: false,
        },
        Question {
            id: ENVIRONMENTAL,
            title: "Have you noticed any of these in your home or workplace?",
            description: Some("Think about anywhere you spend several hours a day."),
            mode: SelectionMode::MultiSelect,
            options: vec![
                multi("env-musty", "A musty or earthy smell", "musty-smell"),
                multi("env-visible", "Visible mold growth", "visible-mold"),
                multi("env-water", "Past water damage or leaks", "water-damage"),
                multi("env-humidity", "Persistently high humidity or condensation", "high-humidity"),
                multi("env-flooding", "A history of flooding in the building", "flooding-history"),
                multi("env-hvac", "HVAC or ventilation problems", "hvac-issues"),
            ],
            required: false,
        },
        Question {
            id: TIMELINE,
            title: "When did your symptoms begin?",
            description: None,
            mode: SelectionMode::SingleSelect,
            options: vec![
                single("time-move", "After moving to a new home or workplace", "after-move"),
                single("time-water", "After a leak, flood, or water event", "after-water"),
                single("time-gradual", "They crept up gradually over time", "gradual-decline"),
                single("time-unsure", "I'm not sure", "not-sure"),
                single("time-always", "As long as I can remember", "as-long-as-remembered"),
            ],
            required: false,
        },
        Question {
            id: DOCTOR_EXPERIENCE,
            title: "What has your experience with doctors been like?",
            description: Some("Choose the answer closest to your situation."),
            mode: SelectionMode::SingleSelect,
            options: vec![
                single(
                    "doc-normal-labs",
                    "I've been told my labs are normal despite feeling unwell",
                    "normal-labs",
                ),
                single(
                    "doc-other-diagnosis",
                    "I've received diagnoses that don't fully explain my symptoms",
                    "other-diagnosis",
                ),
                single("doc-none", "I haven't seen a doctor about this", "no-doctor"),
                single("doc-care", "I'm in ongoing care that's helping", "ongoing-care"),
            ],
            required: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bank_satisfies_structural_invariants() {
        let bank = QuestionBank::standard();
        assert_eq!(bank.len(), 5);
        QuestionBank::new(bank.questions().to_vec()).expect("standard bank validates");
    }

    #[test]
    fn standard_bank_orders_questions_for_step_numbering() {
        let bank = QuestionBank::standard();
        let ids: Vec<&str> = bank.questions().iter().map(|question| question.id).collect();
        assert_eq!(
            ids,
            vec![
                SYMPTOMS_NEURO,
                SYMPTOMS_PHYSICAL,
                ENVIRONMENTAL,
                TIMELINE,
                DOCTOR_EXPERIENCE
            ]
        );
        assert_eq!(bank.position(ENVIRONMENTAL), Some(2));
    }

    #[test]
    fn sanitized_store_drops_invalid_raw_input() {
        let bank = QuestionBank::standard();
        let store = bank.sanitized_store(vec![
            (
                ENVIRONMENTAL.to_string(),
                Answer::Multi(vec![
                    "musty-smell".to_string(),
                    "musty-smell".to_string(),
                    "definitely-not-an-option".to_string(),
                ]),
            ),
            (
                "favorite-color".to_string(),
                Answer::Single("blue".to_string()),
            ),
            (
                TIMELINE.to_string(),
                Answer::Multi(vec!["after-move".to_string()]),
            ),
        ]);

        assert_eq!(store.selection_count(ENVIRONMENTAL), 1);
        assert!(store.get("favorite-color").is_none());
        assert!(store.get(TIMELINE).is_none(), "shape mismatch is dropped");
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let mut questions = QuestionBank::standard().questions().to_vec();
        let duplicate = questions[0].clone();
        questions.push(duplicate);
        match QuestionBank::new(questions) {
            Err(QuestionBankError::DuplicateQuestion(id)) => assert_eq!(id, SYMPTOMS_NEURO),
            other => panic!("expected duplicate rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejects_questions_without_options() {
        let mut questions = QuestionBank::standard().questions().to_vec();
        questions[3].options.clear();
        match QuestionBank::new(questions) {
            Err(QuestionBankError::EmptyOptions(id)) => assert_eq!(id, TIMELINE),
            other => panic!("expected empty-options rejection, got {other:?}"),
        }
    }
}
