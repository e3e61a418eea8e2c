//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for dog records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Dog::validate()` before persistence.
//! - Repository APIs return semantic errors (`DuplicateName`) in addition to
//!   DB transport errors.

pub mod dog_repo;
