use crate::error::ConfigError;
use serde::{Deserialize, Deserializer};

/// The query catalog: every SQL statement the application runs, keyed by its
/// logical name.
///
/// The SQL text is opaque here. A key absent from the source file, or written
/// with no value, leaves its slot empty; the statement then fails where it is
/// executed, not at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Queries {
    #[serde(deserialize_with = "null_as_empty")]
    pub drop_user: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub drop_restaurants: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub create_user: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub create_restaurants: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub insert_user: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub insert_restaurant: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub select_users: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub select_restaurants: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub select_join: String,
}

// `insert_user:` and `insert_user: ~` both arrive as null.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Queries {
    /// Parses a catalog from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Yaml))
            .build()?;

        Ok(builder.try_deserialize::<Queries>()?)
    }

    /// Every slot as a `(name, sql)` pair, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("drop_user", self.drop_user.as_str()),
            ("drop_restaurants", self.drop_restaurants.as_str()),
            ("create_user", self.create_user.as_str()),
            ("create_restaurants", self.create_restaurants.as_str()),
            ("insert_user", self.insert_user.as_str()),
            ("insert_restaurant", self.insert_restaurant.as_str()),
            ("select_users", self.select_users.as_str()),
            ("select_restaurants", self.select_restaurants.as_str()),
            ("select_join", self.select_join.as_str()),
        ]
    }

    /// Names of the slots that hold no SQL.
    pub fn missing_entries(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, sql)| sql.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}
