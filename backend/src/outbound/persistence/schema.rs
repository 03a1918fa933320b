//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered users.
    ///
    /// `username` carries a unique constraint (`users_username_key`);
    /// duplicate registrations surface as unique-violation errors rather
    /// than being checked application-side.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Name the user registered under; unique, byte-exact.
        username -> Varchar,
        /// Lifetime number of exercises appended for this user.
        exercise_count -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged exercises, denormalised by owner username.
    ///
    /// Indexed on `(username, performed_on)` for windowed log reads.
    exercises (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user's username at write time.
        username -> Varchar,
        /// Free-text description of the activity.
        description -> Text,
        /// Duration in minutes.
        duration_minutes -> Float8,
        /// Calendar day the exercise took place on.
        performed_on -> Date,
        /// Record creation timestamp; tiebreak for same-day ordering.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, exercises);
