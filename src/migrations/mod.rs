// Embedded database migrations

pub mod diesel;

pub use diesel::{run_migrations, should_run_migrations};
