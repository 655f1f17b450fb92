//! Per-user profile record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::survey::{MbtiType, TraitProfile};

use super::PhoneNumber;

/// The scored profile stored for one user.
///
/// Replaced wholesale on every survey submission; there is no merging or
/// version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    user_id: UserId,
    phone_number: Option<PhoneNumber>,
    #[serde(rename = "mbti_traits")]
    traits: TraitProfile,
    scored_at: Timestamp,
}

impl Profile {
    pub fn new(
        user_id: UserId,
        phone_number: Option<PhoneNumber>,
        traits: TraitProfile,
        scored_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            phone_number,
            traits,
            scored_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    pub fn traits(&self) -> &TraitProfile {
        &self.traits
    }

    pub fn mbti_type(&self) -> &MbtiType {
        &self.traits.mbti_type
    }

    pub fn scored_at(&self) -> Timestamp {
        self.scored_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::{QuestionBank, ScoringEngine, TieBreak};

    fn traits() -> TraitProfile {
        let bank = QuestionBank::standard();
        ScoringEngine::new(&bank, TieBreak::SecondPole)
            .score(&[])
            .unwrap()
    }

    #[test]
    fn serializes_as_stored_record() {
        let profile = Profile::new(
            UserId::new("u-1").unwrap(),
            Some(PhoneNumber::new("+15550001111").unwrap()),
            traits(),
            Timestamp::from_unix_secs(1_700_000_000),
        );

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["user_id"], "u-1");
        assert_eq!(json["phone_number"], "+15550001111");
        assert_eq!(json["mbti_traits"]["type"], "INFP");
        assert!(json["mbti_traits"]["behavioral_traits"]["planning_style"].is_object());

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn phone_is_optional() {
        let profile = Profile::new(UserId::new("u-2").unwrap(), None, traits(), Timestamp::now());
        assert!(profile.phone_number().is_none());
        assert_eq!(profile.mbti_type().as_str(), "INFP");
    }
}
