//! A bounded score a user assigns to a title.

use serde::Deserialize;
use serde::Serialize;

/// A user rating, always within `[1, 10]`.
///
/// The bound is enforced on construction and on deserialization, so a
/// malformed persisted value fails to decode instead of smuggling an
/// out-of-range score into the collection.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("rating {0} is outside the allowed 1-10 range")]
pub struct RatingOutOfRange(pub u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, RatingOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(Rating::new(0), Err(RatingOutOfRange(0)));
        assert_eq!(Rating::new(11), Err(RatingOutOfRange(11)));
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(10).is_ok());
    }

    #[test]
    fn deserialization_enforces_the_bound() {
        assert!(serde_json::from_str::<Rating>("7").is_ok());
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("42").is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let rating = Rating::new(8).unwrap();
        let encoded = serde_json::to_string(&rating).unwrap();
        assert_eq!(encoded, "8");
        assert_eq!(serde_json::from_str::<Rating>(&encoded).unwrap(), rating);
    }
}
