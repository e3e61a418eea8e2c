//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kennel_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use kennel_core::db::open_db_in_memory;
use kennel_core::{DogService, SqliteDogRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kennel_core version={}", kennel_core::core_version());

    // In-memory roundtrip probe: register one record, look it up by name.
    match smoke_roundtrip() {
        Ok(()) => {
            println!("kennel_core smoke=ok");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("kennel_core smoke=error {message}");
            ExitCode::FAILURE
        }
    }
}

fn smoke_roundtrip() -> Result<(), String> {
    let conn = open_db_in_memory().map_err(|err| err.to_string())?;
    let repo = SqliteDogRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = DogService::new(repo);

    service
        .register_dog("Rex", "Border Collie", 3)
        .map_err(|err| err.to_string())?;

    match service.find_by_name("Rex").map_err(|err| err.to_string())? {
        Some(dog) => {
            println!(
                "kennel_core probe name={} breed={} age={}",
                dog.name, dog.breed, dog.age
            );
            Ok(())
        }
        None => Err("registered record was not found by name".to_string()),
    }
}
