//! Domain model for the dog registry.
//!
//! # Responsibility
//! - Define the canonical record shape used by core persistence logic.
//! - Own the write-time field rules (presence, trimming, age range).
//!
//! # Invariants
//! - Every record is uniquely identified by its `name`.
//! - Text fields are stored trimmed; `Dog::validate()` is the gate on
//!   repository write paths.

pub mod dog;
