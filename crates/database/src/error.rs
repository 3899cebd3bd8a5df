use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to the database")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Database query failed")]
    QueryError(#[from] sqlx::Error),

    #[error("Refusing to run an empty SQL statement")]
    EmptyStatement,
}
