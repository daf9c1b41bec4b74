use crate::error::ModelError;

/// A user rating accepted by `POST /movie/{id}/rating`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rating(f32);

impl Rating {
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Result<Self, ModelError> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(ModelError::InvalidRating(value))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Rating {
    type Error = ModelError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_inclusive_bounds() {
        assert_eq!(Rating::new(1.0).unwrap().value(), 1.0);
        assert_eq!(Rating::new(10.0).unwrap().value(), 10.0);
        assert_eq!(Rating::new(7.5).unwrap().value(), 7.5);
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(Rating::new(0.5).is_err());
        assert!(Rating::new(10.5).is_err());
        assert!(Rating::new(f32::NAN).is_err());
        assert!(Rating::new(f32::INFINITY).is_err());
    }
}
