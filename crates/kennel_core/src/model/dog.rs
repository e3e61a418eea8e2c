//! Dog domain model.
//!
//! # Responsibility
//! - Define the canonical registered-dog record.
//! - Normalize caller input (trim) and stamp creation time on construction.
//!
//! # Invariants
//! - `name` is the stable identity of a record and is unique in storage.
//! - Persisted `name`/`breed` never carry leading or trailing whitespace.
//! - `age` is a non-negative number of years.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Canonical record for one registered dog.
///
/// `name` doubles as the record identity; there is no surrogate id. The
/// constructors normalize text fields, so a `Dog` built through them always
/// passes `validate()` unless `age` is negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Unique registry name. Stored trimmed, matched case-sensitively.
    pub name: String,
    /// Free-form breed label. Stored trimmed.
    pub breed: String,
    /// Age in whole years. Must be >= 0.
    pub age: i64,
    /// Creation timestamp in Unix epoch milliseconds.
    pub created_at: i64,
}

/// Write-time validation failure for a dog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogValidationError {
    EmptyName,
    EmptyBreed,
    UntrimmedName,
    UntrimmedBreed,
    NegativeAge,
}

impl Display for DogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "dog name must not be empty"),
            Self::EmptyBreed => write!(f, "dog breed must not be empty"),
            Self::UntrimmedName => {
                write!(f, "dog name must not carry leading/trailing whitespace")
            }
            Self::UntrimmedBreed => {
                write!(f, "dog breed must not carry leading/trailing whitespace")
            }
            Self::NegativeAge => write!(f, "dog age must not be negative"),
        }
    }
}

impl Error for DogValidationError {}

impl Dog {
    /// Creates a record from caller input, trimming text fields and stamping
    /// `created_at` with the current wall clock.
    pub fn new(name: impl Into<String>, breed: impl Into<String>, age: i64) -> Self {
        Self::with_created_at(name, breed, age, now_epoch_ms())
    }

    /// Creates a record with an explicit creation timestamp.
    ///
    /// Used by import paths and by row hydration where the timestamp already
    /// exists. Text fields are still trimmed.
    pub fn with_created_at(
        name: impl Into<String>,
        breed: impl Into<String>,
        age: i64,
        created_at: i64,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            breed: breed.into().trim().to_string(),
            age,
            created_at,
        }
    }

    /// Checks the write-time field rules.
    ///
    /// Repository write paths call this before any SQL mutation, so records
    /// assembled by hand (bypassing the constructors) are still rejected
    /// before they reach storage.
    pub fn validate(&self) -> Result<(), DogValidationError> {
        if self.name.trim().is_empty() {
            return Err(DogValidationError::EmptyName);
        }
        if self.name.trim() != self.name {
            return Err(DogValidationError::UntrimmedName);
        }
        if self.breed.trim().is_empty() {
            return Err(DogValidationError::EmptyBreed);
        }
        if self.breed.trim() != self.breed {
            return Err(DogValidationError::UntrimmedBreed);
        }
        if self.age < 0 {
            return Err(DogValidationError::NegativeAge);
        }
        Ok(())
    }
}

/// Current wall clock in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, Dog, DogValidationError};

    #[test]
    fn new_trims_name_and_breed() {
        let dog = Dog::new("  Rex  ", "\tBorder Collie\n", 3);
        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.breed, "Border Collie");
        assert_eq!(dog.age, 3);
    }

    #[test]
    fn new_stamps_creation_time() {
        let before = now_epoch_ms();
        let dog = Dog::new("Rex", "Border Collie", 3);
        let after = now_epoch_ms();
        assert!(dog.created_at >= before);
        assert!(dog.created_at <= after);
    }

    #[test]
    fn validate_rejects_empty_and_untrimmed_fields() {
        let valid = Dog::new("Rex", "Border Collie", 3);
        assert_eq!(valid.validate(), Ok(()));

        let mut dog = valid.clone();
        dog.name = "   ".to_string();
        assert_eq!(dog.validate(), Err(DogValidationError::EmptyName));

        let mut dog = valid.clone();
        dog.name = " Rex".to_string();
        assert_eq!(dog.validate(), Err(DogValidationError::UntrimmedName));

        let mut dog = valid.clone();
        dog.breed = String::new();
        assert_eq!(dog.validate(), Err(DogValidationError::EmptyBreed));

        let mut dog = valid.clone();
        dog.breed = "Border Collie ".to_string();
        assert_eq!(dog.validate(), Err(DogValidationError::UntrimmedBreed));

        let mut dog = valid;
        dog.age = -1;
        assert_eq!(dog.validate(), Err(DogValidationError::NegativeAge));
    }

    #[test]
    fn serde_roundtrip_preserves_all_fields() {
        let dog = Dog::with_created_at("Rex", "Border Collie", 3, 1_234_567_890_000);
        let json = serde_json::to_string(&dog).unwrap();
        let parsed: Dog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dog);
    }
}
