//! # Restodb Database Crate
//!
//! This crate is the application-specific interface to the SQLite database.
//!
//! ## Architectural Principles
//!
//! - **Externalized SQL:** No statement text lives here. Every operation takes
//!   its SQL from the caller, normally a slot of the `configuration::Queries`
//!   catalog, and runs it as a prepared statement with positional binds.
//! - **One Owned Connection:** A single `SqliteConnection` is owned by
//!   `DbRepository`. There is no pool; the connection is released when the
//!   repository is closed or dropped.
//! - **Positional Scans:** Result rows are mapped into `core_types` records by
//!   column position, so the catalog decides the column names.
//!
//! ## Public API
//!
//! - `connect`: Opens the single database connection.
//! - `initialize_schema`: Runs the catalog's drop/create statements in order.
//! - `DbRepository`: Holds the connection and provides the insert/select methods.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::DbRepository;
pub use schema::initialize_schema;
