//! Database operations and SQLite management for trips and itineraries.
//!
//! This module provides the SQLite backend of the itinerary system. It
//! handles connections and schema management, implements the
//! [`Repository`](crate::store::Repository) seam used by the ordering
//! coordinator, and provides the plain CRUD queries for users, trips, days,
//! places and items.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod item_queries;
pub mod migrations;
pub mod place_queries;
mod rows;
pub mod trip_queries;
pub mod unit_of_work;

pub use unit_of_work::SqliteUnit;

/// Database connection and operations handler.
#[derive(Debug)]
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
