//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{exercises, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub exercise_count: i32,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
///
/// `created_at` is filled in by the database default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub exercise_count: i32,
}

/// Row struct for reading from the exercises table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    #[expect(dead_code, reason = "entry ids never leave the persistence layer")]
    pub id: Uuid,
    #[expect(dead_code, reason = "log reads already filter on the owner")]
    pub username: String,
    pub description: String,
    pub duration_minutes: f64,
    pub performed_on: NaiveDate,
    #[expect(dead_code, reason = "only used server-side as an ordering tiebreak")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new exercise records.
///
/// `created_at` is filled in by the database default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub description: &'a str,
    pub duration_minutes: f64,
    pub performed_on: NaiveDate,
}
