use crate::connection::connect;
use crate::schema::initialize_schema;
use crate::DbError;
use configuration::Queries;
use core_types::{JoinRow, Restaurant, User};
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, FromRow};
use tracing::debug;

/// The `DbRepository` owns the single database connection and exposes the
/// application's data access operations over it.
///
/// SQL text is supplied by the caller (normally from the query catalog) and is
/// executed as a prepared statement with positional parameters. Dropping the
/// repository releases the connection; `close` does so explicitly and reports
/// any error from the shutdown.
#[derive(Debug)]
pub struct DbRepository {
    conn: SqliteConnection,
}

/// Rejects empty SQL before it reaches the driver, which would otherwise
/// accept it as a no-op.
pub(crate) fn statement(sql: &str) -> Result<&str, DbError> {
    if sql.trim().is_empty() {
        return Err(DbError::EmptyStatement);
    }
    Ok(sql)
}

impl DbRepository {
    /// Creates a new `DbRepository` around an open connection.
    pub fn new(conn: SqliteConnection) -> Self {
        Self { conn }
    }

    /// Connects to `data_source` and wraps the connection.
    pub async fn open(data_source: &str) -> Result<Self, DbError> {
        Ok(Self::new(connect(data_source).await?))
    }

    /// Drops and recreates the schema using the catalog's DDL.
    pub async fn initialize(&mut self, queries: &Queries) -> Result<(), DbError> {
        initialize_schema(&mut self.conn, queries).await
    }

    /// Inserts a user. The id is assigned by the database.
    pub async fn insert_user(&mut self, user: &User, sql: &str) -> Result<(), DbError> {
        let result = sqlx::query(statement(sql)?)
            .bind(user.name.as_str())
            .bind(user.lastname.as_str())
            .bind(user.password.as_str())
            .bind(user.email.as_str())
            .bind(user.phone.as_str())
            .execute(&mut self.conn)
            .await?;

        debug!(rows = result.rows_affected(), "Inserted user");
        Ok(())
    }

    /// Inserts a restaurant. The id is assigned by the database.
    pub async fn insert_restaurant(
        &mut self,
        restaurant: &Restaurant,
        sql: &str,
    ) -> Result<(), DbError> {
        let result = sqlx::query(statement(sql)?)
            .bind(restaurant.name.as_str())
            .bind(restaurant.restaurant_type.as_str())
            .bind(restaurant.keys.as_str())
            .bind(restaurant.average_price)
            .bind(restaurant.user_id)
            .execute(&mut self.conn)
            .await?;

        debug!(rows = result.rows_affected(), "Inserted restaurant");
        Ok(())
    }

    /// Fetches users in the order the query returns them.
    /// Columns: id, name, lastname, password, email, phone.
    pub async fn select_users(&mut self, sql: &str) -> Result<Vec<User>, DbError> {
        self.select_all(sql).await
    }

    /// Fetches restaurants.
    /// Columns: id, name, type, keys, average_price, user_id.
    pub async fn select_restaurants(&mut self, sql: &str) -> Result<Vec<Restaurant>, DbError> {
        self.select_all(sql).await
    }

    /// Fetches the user/restaurant join.
    /// Columns: user id, user name, user lastname, restaurant id, restaurant name,
    /// type, average_price.
    pub async fn select_join(&mut self, sql: &str) -> Result<Vec<JoinRow>, DbError> {
        self.select_all(sql).await
    }

    /// Closes the connection, consuming the repository.
    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await?;
        debug!("Database connection closed");
        Ok(())
    }

    // Rows are pulled one at a time from the cursor. The first row that fails
    // to map ends the call with that error, and the rows gathered so far are
    // dropped together with the cursor.
    async fn select_all<T>(&mut self, sql: &str) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static,
    {
        let mut rows = sqlx::query_as::<_, T>(statement(sql)?).fetch(&mut self.conn);

        let mut records = Vec::new();
        while let Some(record) = rows.try_next().await? {
            records.push(record);
        }

        debug!(count = records.len(), "Fetched rows");
        Ok(records)
    }
}
