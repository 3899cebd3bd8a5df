use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A registered user.
///
/// The `id` is assigned by the store on insert; whatever value a caller puts
/// here before inserting is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    /// Stored as given. Hash it before it reaches this struct if the data matters.
    pub password: String,
    pub email: String,
    pub phone: String,
}

/// A restaurant owned by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    /// Free-text category, stored in the `type` column.
    #[serde(rename = "type")]
    pub restaurant_type: String,
    /// Opaque attribute, carried through untouched.
    pub keys: String,
    pub average_price: i64,
    /// Id of the owning user. Not checked against the user table here.
    pub user_id: i64,
}

/// One row of the user/restaurant join. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRow {
    pub user_id: i64,
    pub user_name: String,
    pub user_lastname: String,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    #[serde(rename = "type")]
    pub restaurant_type: String,
    pub average_price: i64,
}

// The catalog SQL is opaque, so rows are mapped by column position rather
// than by name: (id, name, lastname, password, email, phone).
impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            name: row.try_get(1)?,
            lastname: row.try_get(2)?,
            password: row.try_get(3)?,
            email: row.try_get(4)?,
            phone: row.try_get(5)?,
        })
    }
}

// (id, name, type, keys, average_price, user_id)
impl<'r> FromRow<'r, SqliteRow> for Restaurant {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            name: row.try_get(1)?,
            restaurant_type: row.try_get(2)?,
            keys: row.try_get(3)?,
            average_price: row.try_get(4)?,
            user_id: row.try_get(5)?,
        })
    }
}

// (user id, user name, user lastname, restaurant id, restaurant name, type, average_price)
impl<'r> FromRow<'r, SqliteRow> for JoinRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get(0)?,
            user_name: row.try_get(1)?,
            user_lastname: row.try_get(2)?,
            restaurant_id: row.try_get(3)?,
            restaurant_name: row.try_get(4)?,
            restaurant_type: row.try_get(5)?,
            average_price: row.try_get(6)?,
        })
    }
}
