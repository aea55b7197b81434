use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionCountError {
    #[error("number of questions must be at least {min}, got {got}")]
    TooFew { min: u32, got: u32 },

    #[error("number of questions cannot exceed {max}, got {got}")]
    TooMany { max: u32, got: u32 },
}

/// Number of questions requested for one quiz, always in `1..=10`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    /// # Errors
    ///
    /// Returns `QuestionCountError` when `value` is outside `1..=10`.
    pub fn new(value: u32) -> Result<Self, QuestionCountError> {
        if value < Self::MIN {
            return Err(QuestionCountError::TooFew {
                min: Self::MIN,
                got: value,
            });
        }
        if value > Self::MAX {
            return Err(QuestionCountError::TooMany {
                max: Self::MAX,
                got: value,
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// All valid counts, for selectors.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Debug for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionCount({})", self.0)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = QuestionCountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
