use crate::error::DbError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use std::str::FromStr;
use tracing::info;

/// Opens a single connection to the SQLite database.
///
/// The data source is either a `sqlite:` URL (e.g. `sqlite::memory:`) or a
/// plain filesystem path. A database file that does not exist yet is created.
/// There is no pool and no reconnect; the caller owns the connection and
/// closes it (or drops it) when done.
pub async fn connect(data_source: &str) -> Result<SqliteConnection, DbError> {
    let options = if data_source.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(data_source).map_err(DbError::ConnectionError)?
    } else {
        SqliteConnectOptions::new().filename(data_source)
    };

    let conn = options
        .create_if_missing(true)
        .connect()
        .await
        .map_err(DbError::ConnectionError)?;

    info!(data_source, "Connected to the database");
    Ok(conn)
}
