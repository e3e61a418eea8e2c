//! Dog registry use-case service.
//!
//! # Responsibility
//! - Provide stable registration and lookup entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::dog::Dog;
use crate::repo::dog_repo::{DogListQuery, DogRepository, RepoResult};

/// Use-case service wrapper for dog registry operations.
pub struct DogService<R: DogRepository> {
    repo: R,
}

impl<R: DogRepository> DogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a dog from raw caller input.
    ///
    /// # Contract
    /// - Trims `name`/`breed` and stamps `created_at` via `Dog::new`.
    /// - Returns the record as stored, including the stamped timestamp.
    /// - Surfaces `DuplicateName` when the (trimmed) name is already taken.
    pub fn register_dog(
        &self,
        name: impl Into<String>,
        breed: impl Into<String>,
        age: i64,
    ) -> RepoResult<Dog> {
        let dog = Dog::new(name, breed, age);
        self.repo.create_dog(&dog)?;
        Ok(dog)
    }

    /// Finds one dog by exact, case-sensitive name.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<Dog>> {
        self.repo.find_by_name(name)
    }

    /// Lists dogs using filter and pagination options.
    pub fn list_dogs(&self, query: &DogListQuery) -> RepoResult<Vec<Dog>> {
        self.repo.list_dogs(query)
    }
}
