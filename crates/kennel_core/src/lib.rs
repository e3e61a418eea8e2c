//! Core domain logic for the Kennel dog registry.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dog::{Dog, DogValidationError};
pub use repo::dog_repo::{
    DogListQuery, DogRepository, RepoError, RepoResult, SqliteDogRepository,
};
pub use service::dog_service::DogService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
