use super::super::profiles::ProfileId;

/// Map a clamped total score onto a profile. Thresholds are evaluated
/// high-to-low, first match wins; every score in [0, 10] lands on exactly
/// one profile.
pub fn classify(score: u8) -> ProfileId {
    if score >= 7 {
        ProfileId::Investigator
    } else if score >= 4 {
        ProfileId::Seeker
    } else {
        ProfileId::Learner
    }
}
