//! Dog repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the registry's write and lookup APIs over `dogs` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Dog::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `find_by_name` matches exactly and case-sensitively; a miss is an empty
//!   result, never an error.

use crate::db::{migrations::latest_version, DbError};
use crate::model::dog::{Dog, DogValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DOG_SELECT_SQL: &str = "SELECT
    name,
    breed,
    age,
    created_at
FROM dogs";

const REQUIRED_COLUMNS: &[&str] = &["name", "breed", "age", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for dog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(DogValidationError),
    Db(DbError),
    /// Write-time uniqueness violation on `dogs.name`.
    DuplicateName(String),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => {
                write!(f, "a dog named `{name}` is already registered")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted dog data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; \
                 open connections through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "connection is missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DogValidationError> for RepoError {
    fn from(value: DogValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing dogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogListQuery {
    /// Optional exact breed filter.
    pub breed: Option<String>,
    /// Maximum rows to return.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Repository interface for dog registry operations.
pub trait DogRepository {
    /// Persists one record. Fails with `DuplicateName` when the name is taken.
    fn create_dog(&self, dog: &Dog) -> RepoResult<()>;
    /// Finds the record whose name equals `name` exactly (case-sensitive).
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Dog>>;
    /// Lists records using filter and pagination options, ordered by name.
    fn list_dogs(&self, query: &DogListQuery) -> RepoResult<Vec<Dog>>;
}

/// SQLite-backed dog repository.
///
/// Borrows a connection supplied by the caller; the repository never opens
/// or owns connections itself.
pub struct SqliteDogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDogRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// Rejects connections whose schema was not bootstrapped through
    /// `db::open_db`/`open_db_in_memory`, so later queries fail here with a
    /// semantic error instead of failing deep inside SQL.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DogRepository for SqliteDogRepository<'_> {
    fn create_dog(&self, dog: &Dog) -> RepoResult<()> {
        dog.validate()?;

        self.conn
            .execute(
                "INSERT INTO dogs (name, breed, age, created_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    dog.name.as_str(),
                    dog.breed.as_str(),
                    dog.age,
                    dog.created_at,
                ],
            )
            .map_err(|err| map_unique_violation(err, &dog.name))?;

        Ok(())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Dog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOG_SELECT_SQL} WHERE name = ?1;"))?;

        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_dog_row(row)?));
        }

        Ok(None)
    }

    fn list_dogs(&self, query: &DogListQuery) -> RepoResult<Vec<Dog>> {
        let mut sql = format!("{DOG_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(breed) = &query.breed {
            sql.push_str(" AND breed = ?");
            bind_values.push(Value::Text(breed.clone()));
        }

        sql.push_str(" ORDER BY name ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut dogs = Vec::new();

        while let Some(row) = rows.next()? {
            dogs.push(parse_dog_row(row)?);
        }

        Ok(dogs)
    }
}

fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'dogs'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("dogs"));
    }

    for column in REQUIRED_COLUMNS {
        let column_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM pragma_table_info('dogs') WHERE name = ?1
            );",
            [column],
            |row| row.get(0),
        )?;
        if column_exists == 0 {
            return Err(RepoError::MissingRequiredColumn {
                table: "dogs",
                column,
            });
        }
    }

    Ok(())
}

fn map_unique_violation(err: rusqlite::Error, name: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateName(name.to_string())
        }
        _ => RepoError::Db(DbError::Sqlite(err)),
    }
}

fn parse_dog_row(row: &Row<'_>) -> RepoResult<Dog> {
    let dog = Dog {
        name: row.get("name")?,
        breed: row.get("breed")?,
        age: row.get("age")?,
        created_at: row.get("created_at")?,
    };

    if let Err(err) = dog.validate() {
        return Err(RepoError::InvalidData(format!(
            "row for `{}` violates record rules: {err}",
            dog.name
        )));
    }

    Ok(dog)
}
