use serde::{Deserialize, Serialize};

/// Outcome category assigned by the score threshold policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileId {
    Investigator,
    Seeker,
    Learner,
}

impl ProfileId {
    pub const fn ordered() -> [Self; 3] {
        [Self::Investigator, Self::Seeker, Self::Learner]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Investigator => "investigator",
            Self::Seeker => "seeker",
            Self::Learner => "learner",
        }
    }
}

/// Follow-up copy rendered on the results step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextSteps {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub cta: &'static str,
}

/// Result-page metadata for one profile. `score_range` documents the
/// classifier thresholds; lookups never enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub title: &'static str,
    pub description: &'static str,
    pub score_range: (u8, u8),
    pub recommendations: Vec<&'static str>,
    pub next_steps: NextSteps,
}

/// Immutable catalog of profile copy, injected alongside the question bank.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    pub fn standard() -> Self {
        Self {
            profiles: standard_profiles(),
        }
    }

    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}

fn standard_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: ProfileId::Investigator,
            title: "The Investigator",
            description: "Your answers show a strong pattern of symptoms alongside likely \
                          exposure. It's worth investigating mold as a root cause now.",
            score_range: (7, 10),
            recommendations: vec![
                "Start the Environmental Assessment module to map your exposure sources.",
                "Document your symptom timeline before your next medical appointment.",
                "Consider professional testing for the spaces you flagged.",
                "Review the practitioner directory for mold-literate clinicians.",
            ],
            next_steps: NextSteps {
                primary: "Begin the full curriculum with the exposure-mapping module.",
                secondary: "Download the symptom and exposure tracking worksheet.",
                cta: "Start investigating",
            },
        },
        Profile {
            id: ProfileId::Seeker,
            title: "The Seeker",
            description: "Several of your answers point toward mold as a possible factor, \
                          but the picture isn't complete yet. Keep gathering evidence.",
            score_range: (4, 6),
            recommendations: vec![
                "Work through the foundations module to learn the common exposure signs.",
                "Keep a two-week symptom journal tied to the places you spend time.",
                "Do the room-by-room home walkthrough checklist.",
            ],
            next_steps: NextSteps {
                primary: "Start with the foundations module of the curriculum.",
                secondary: "Set up your symptom journal from the template.",
                cta: "Keep exploring",
            },
        },
        Profile {
            id: ProfileId::Learner,
            title: "The Learner",
            description: "Your answers don't show a strong mold signal right now. Learning \
                          the basics will help you recognize changes early.",
            score_range: (0, 3),
            recommendations: vec![
                "Read the introduction to how mold affects health.",
                "Learn the early warning signs of water damage at home.",
                "Revisit this assessment if your symptoms or environment change.",
            ],
            next_steps: NextSteps {
                primary: "Browse the introductory articles at your own pace.",
                secondary: "Bookmark the assessment to retake later.",
                cta: "Start learning",
            },
        },
    ]
}
