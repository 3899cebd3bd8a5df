use std::path::Path;
use tracing::debug;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::Queries;

/// Loads the query catalog from a YAML file.
///
/// This function is the primary entry point for this crate. It reads the file,
/// deserializes it into the strongly-typed `Queries` struct, and returns it.
/// A missing or unparseable file is an error; missing keys are not.
pub fn load_queries(path: impl AsRef<Path>) -> Result<Queries, ConfigError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading query catalog");

    let builder = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Yaml))
        .build()?;

    let queries = builder.try_deserialize::<Queries>()?;

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CATALOG: &str = r#"
drop_user: "DROP TABLE IF EXISTS user"
drop_restaurants: "DROP TABLE IF EXISTS restaurants"
create_user: "CREATE TABLE user (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)"
create_restaurants: "CREATE TABLE restaurants (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)"
insert_user: "INSERT INTO user(name,lastname,password,email,phone) VALUES(?,?,?,?,?)"
insert_restaurant: "INSERT INTO restaurants(name,type,keys,average_price,user_id) VALUES(?,?,?,?,?)"
select_users: "SELECT id, name, lastname, password, email, phone FROM user"
select_restaurants: "SELECT id, name, type, keys, average_price, user_id FROM restaurants"
select_join: "SELECT u.id, u.name FROM user u JOIN restaurants r ON r.user_id = u.id"
"#;

    #[test]
    fn parses_all_nine_entries() {
        let queries = Queries::from_yaml_str(FULL_CATALOG).unwrap();

        assert_eq!(
            queries.insert_user,
            "INSERT INTO user(name,lastname,password,email,phone) VALUES(?,?,?,?,?)"
        );
        assert_eq!(queries.drop_user, "DROP TABLE IF EXISTS user");
        assert!(queries.missing_entries().is_empty());
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let queries = Queries::from_yaml_str("select_users: \"SELECT 1\"\n").unwrap();

        assert_eq!(queries.select_users, "SELECT 1");
        assert_eq!(queries.insert_user, "");
        let missing = queries.missing_entries();
        assert_eq!(missing.len(), 8);
        assert!(missing.contains(&"insert_user"));
        assert!(!missing.contains(&"select_users"));
    }

    #[test]
    fn keys_without_a_value_are_empty() {
        let queries = Queries::from_yaml_str("insert_user:\nselect_users: ~\n").unwrap();

        assert_eq!(queries.insert_user, "");
        assert_eq!(queries.select_users, "");
        let missing = queries.missing_entries();
        assert!(missing.contains(&"insert_user"));
        assert!(missing.contains(&"select_users"));
    }

    #[test]
    fn load_error_keeps_the_cause_as_source_only() {
        use std::error::Error;

        let err = load_queries("definitely/not/here/queries.yaml").unwrap_err();

        assert_eq!(err.to_string(), "Failed to load query catalog");
        assert!(err.source().is_some());
    }

    #[test]
    fn malformed_yaml_is_a_load_error() {
        let result = Queries::from_yaml_str("drop_user: [unterminated");
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = load_queries("definitely/not/here/queries.yaml");
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn loads_the_shipped_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/queries.yaml");
        let queries = load_queries(path).unwrap();

        assert!(queries.missing_entries().is_empty());
        assert!(queries.select_join.to_uppercase().contains("JOIN"));
    }
}
