//! Dataset persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Save and load the whole registry dataset as one unit.
//! - Keep SQL details behind the `DatasetRepository` boundary.
//!
//! # Invariants
//! - Collection order survives a save/load cycle (`position` column).
//! - A save either replaces every row or changes nothing.
//! - Loading rejects invalid or inconsistent rows instead of masking them.
//! - The repository never touches in-memory history; it only reads the
//!   dataset it is handed.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::allocation::Allocation;
use crate::model::room::{Floor, Room, RoomNumber};
use crate::model::student::{Student, StudentId};
use crate::store::{Dataset, ReadOnlyDataset};
use log::{error, info};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection schema is not at the version this build writes.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted rows cannot be turned into a valid dataset.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "dataset repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted registry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
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

/// Whole-dataset storage used by the registry service.
pub trait DatasetRepository {
    fn load_dataset(&self) -> RepoResult<Dataset>;
    fn save_dataset(&self, dataset: &dyn ReadOnlyDataset) -> RepoResult<()>;
}

pub struct SqliteDatasetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDatasetRepository<'conn> {
    /// Creates a repository over a fully migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl DatasetRepository for SqliteDatasetRepository<'_> {
    fn load_dataset(&self) -> RepoResult<Dataset> {
        let started_at = Instant::now();

        let students = load_rows(
            self.conn,
            "SELECT student_id, name, phone, email, faculty FROM students ORDER BY position ASC;",
            parse_student_row,
        )?;
        let rooms = load_rows(
            self.conn,
            "SELECT floor, room_number, room_type FROM rooms ORDER BY position ASC;",
            parse_room_row,
        )?;
        let allocations = load_rows(
            self.conn,
            "SELECT student_id, floor, room_number FROM allocations ORDER BY position ASC;",
            parse_allocation_row,
        )?;

        let mut dataset = Dataset::new();
        dataset
            .set_students(students)
            .and_then(|()| dataset.set_rooms(rooms))
            .and_then(|()| dataset.set_allocations(allocations))
            .and_then(|()| dataset.check_consistency())
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        info!(
            "event=dataset_load module=repo status=ok students={} rooms={} allocations={} duration_ms={}",
            dataset.students().len(),
            dataset.rooms().len(),
            dataset.allocations().len(),
            started_at.elapsed().as_millis()
        );
        Ok(dataset)
    }

    fn save_dataset(&self, dataset: &dyn ReadOnlyDataset) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = write_all_rows(self.conn, dataset);
        match &result {
            Ok(()) => info!(
                "event=dataset_save module=repo status=ok students={} rooms={} allocations={} duration_ms={}",
                dataset.students().len(),
                dataset.rooms().len(),
                dataset.allocations().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=dataset_save module=repo status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

fn write_all_rows(conn: &Connection, dataset: &dyn ReadOnlyDataset) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    tx.execute_batch(
        "DELETE FROM allocations;
         DELETE FROM students;
         DELETE FROM rooms;",
    )?;

    {
        let mut insert = tx.prepare(
            "INSERT INTO students (student_id, position, name, phone, email, faculty)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        )?;
        for (position, student) in dataset.students().iter().enumerate() {
            insert.execute(params![
                student.student_id.as_str(),
                position as i64,
                student.name.as_str(),
                student.phone.as_str(),
                student.email.as_str(),
                student.faculty.as_str(),
            ])?;
        }
    }

    {
        let mut insert = tx.prepare(
            "INSERT INTO rooms (floor, room_number, position, room_type)
             VALUES (?1, ?2, ?3, ?4);",
        )?;
        for (position, room) in dataset.rooms().iter().enumerate() {
            insert.execute(params![
                room.floor.get(),
                room.room_number.get(),
                position as i64,
                room.room_type.as_str(),
            ])?;
        }
    }

    {
        let mut insert = tx.prepare(
            "INSERT INTO allocations (position, student_id, floor, room_number)
             VALUES (?1, ?2, ?3, ?4);",
        )?;
        for (position, allocation) in dataset.allocations().iter().enumerate() {
            insert.execute(params![
                position as i64,
                allocation.student_id.as_str(),
                allocation.floor.get(),
                allocation.room_number.get(),
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}

fn load_rows<T>(
    conn: &Connection,
    sql: &str,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let student_id: String = row.get("student_id")?;
    Student::parse(
        row.get::<_, String>("name")?.as_str(),
        row.get::<_, String>("phone")?.as_str(),
        row.get::<_, String>("email")?.as_str(),
        row.get::<_, String>("faculty")?.as_str(),
        student_id.as_str(),
    )
    .map_err(|err| RepoError::InvalidData(format!("students row `{student_id}`: {err}")))
}

fn parse_room_row(row: &Row<'_>) -> RepoResult<Room> {
    let floor = parse_floor(row)?;
    let room_number = parse_room_number(row)?;
    let room_type: String = row.get("room_type")?;
    let room_type = room_type
        .parse()
        .map_err(|err| RepoError::InvalidData(format!("rooms.room_type: {err}")))?;
    Ok(Room::new(floor, room_number, room_type))
}

fn parse_allocation_row(row: &Row<'_>) -> RepoResult<Allocation> {
    let student_id: String = row.get("student_id")?;
    let student_id = StudentId::parse(&student_id)
        .map_err(|err| RepoError::InvalidData(format!("allocations.student_id: {err}")))?;
    Ok(Allocation::new(
        student_id,
        parse_floor(row)?,
        parse_room_number(row)?,
    ))
}

fn parse_floor(row: &Row<'_>) -> RepoResult<Floor> {
    let value: i64 = row.get("floor")?;
    u16::try_from(value)
        .ok()
        .and_then(|value| Floor::new(value).ok())
        .ok_or_else(|| RepoError::InvalidData(format!("invalid floor value `{value}`")))
}

fn parse_room_number(row: &Row<'_>) -> RepoResult<RoomNumber> {
    let value: i64 = row.get("room_number")?;
    u16::try_from(value)
        .ok()
        .and_then(|value| RoomNumber::new(value).ok())
        .ok_or_else(|| RepoError::InvalidData(format!("invalid room number value `{value}`")))
}
