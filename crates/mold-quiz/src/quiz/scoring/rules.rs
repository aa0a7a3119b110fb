use super::super::bank::{
    DOCTOR_EXPERIENCE, ENVIRONMENTAL, SYMPTOMS_NEURO, SYMPTOMS_PHYSICAL, TIMELINE,
};
use super::super::domain::AnswerStore;
use super::{ScoreComponent, ScoreFactor, MAX_SCORE};

const NEURO_CAP: usize = 6;
const PHYSICAL_CAP: usize = 5;
const ENVIRONMENTAL_CAP: usize = 8;

pub(crate) fn score_answers(answers: &AnswerStore) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::with_capacity(5);

    let neuro_selected = answers.selection_count(SYMPTOMS_NEURO);
    let neuro_points = neuro_selected.min(NEURO_CAP) as u8;
    components.push(ScoreComponent {
        factor: ScoreFactor::NeurologicalSymptoms,
        points: neuro_points,
        notes: format!("{neuro_selected} selected, counted up to {NEURO_CAP}"),
    });

    let physical_selected = answers.selection_count(SYMPTOMS_PHYSICAL);
    let physical_points = physical_selected.min(PHYSICAL_CAP) as u8;
    components.push(ScoreComponent {
        factor: ScoreFactor::PhysicalSymptoms,
        points: physical_points,
        notes: format!("{physical_selected} selected, counted up to {PHYSICAL_CAP}"),
    });

    let environmental_selected = answers.selection_count(ENVIRONMENTAL);
    let environmental_points = (environmental_selected * 2).min(ENVIRONMENTAL_CAP) as u8;
    components.push(ScoreComponent {
        factor: ScoreFactor::EnvironmentalExposure,
        points: environmental_points,
        notes: format!(
            "{environmental_selected} selected at 2 points each, capped at {ENVIRONMENTAL_CAP}"
        ),
    });

    let timeline = answers.single(TIMELINE);
    let timeline_points = match timeline {
        Some("after-move") | Some("after-water") => 3,
        Some("gradual-decline") => 2,
        Some("not-sure") => 1,
        _ => 0,
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::SymptomTimeline,
        points: timeline_points,
        notes: match timeline {
            Some(value) => format!("answered '{value}'"),
            None => "not answered".to_string(),
        },
    });

    let doctor = answers.single(DOCTOR_EXPERIENCE);
    let doctor_points = match doctor {
        Some("normal-labs") => 4,
        Some("other-diagnosis") => 3,
        Some("no-doctor") => 1,
        _ => 0,
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::DoctorExperience,
        points: doctor_points,
        notes: match doctor {
            Some(value) => format!("answered '{value}'"),
            None => "not answered".to_string(),
        },
    });

    // Raw sub-caps total 26, so the final clamp dominates high-signal cases.
    let raw: u8 = components.iter().map(|component| component.points).sum();
    (components, raw.min(MAX_SCORE))
}
