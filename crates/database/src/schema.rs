use crate::error::DbError;
use crate::repository::statement;
use configuration::Queries;
use sqlx::sqlite::SqliteConnection;
use tracing::{debug, info};

/// Drops and recreates the `user` and `restaurants` tables.
///
/// Statements run in a fixed order: drop user, drop restaurants, create user,
/// create restaurants. The first failure stops the sequence and whatever already
/// ran stays applied; nothing is rolled back.
pub async fn initialize_schema(
    conn: &mut SqliteConnection,
    queries: &Queries,
) -> Result<(), DbError> {
    let statements = [
        ("drop_user", queries.drop_user.as_str()),
        ("drop_restaurants", queries.drop_restaurants.as_str()),
        ("create_user", queries.create_user.as_str()),
        ("create_restaurants", queries.create_restaurants.as_str()),
    ];

    for (name, sql) in statements {
        debug!(statement = name, "Executing schema statement");
        sqlx::query(statement(sql)?).execute(&mut *conn).await?;
    }

    info!("Database schema initialized");
    Ok(())
}
