use anyhow::{Context, Result};
use clap::Parser;
use configuration::{load_queries, Queries};
use core_types::{Restaurant, User};
use database::DbRepository;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Creates the user and restaurant tables, inserts sample rows and prints them back.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database file path or `sqlite:` URL.
    #[arg(long, env = "DATABASE_URL", default_value = "./project.db")]
    database: String,

    /// YAML file holding the SQL query catalog.
    #[arg(long, default_value = "./config/queries.yaml")]
    queries: PathBuf,
}

/// The main entry point. Every failure is fatal.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine; the CLI defaults apply.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install the log subscriber: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Loaded first so a bad catalog path never leaves an empty database file behind.
    let queries = load_queries(&cli.queries).context("Error loading queries")?;
    warn_on_missing(&queries);

    let mut repo = DbRepository::open(&cli.database)
        .await
        .context("Error opening database")?;

    // The connection is closed on both paths before the result is reported.
    let outcome = demo(&mut repo, &queries).await;
    let closed = repo.close().await.context("Error closing database");

    outcome.and(closed)
}

async fn demo(repo: &mut DbRepository, queries: &Queries) -> Result<()> {
    repo.initialize(queries)
        .await
        .context("Error initializing database")?;

    let user = User {
        name: "lorem".to_string(),
        lastname: "lorem".to_string(),
        password: "lorem".to_string(),
        email: "lorem@example.com".to_string(),
        phone: "+88888888888".to_string(),
        ..Default::default()
    };
    repo.insert_user(&user, &queries.insert_user)
        .await
        .context("Error inserting user")?;

    let restaurant = Restaurant {
        name: "ipsum".to_string(),
        restaurant_type: "ipsum".to_string(),
        keys: "ipsum".to_string(),
        average_price: 2,
        user_id: 1,
        ..Default::default()
    };
    repo.insert_restaurant(&restaurant, &queries.insert_restaurant)
        .await
        .context("Error inserting restaurant")?;

    let users = repo
        .select_users(&queries.select_users)
        .await
        .context("Error selecting users")?;
    for u in &users {
        println!("User: {} {} {}", u.id, u.name, u.lastname);
    }

    let restaurants = repo
        .select_restaurants(&queries.select_restaurants)
        .await
        .context("Error selecting restaurants")?;
    for r in &restaurants {
        println!("Restaurant: {} {} {}", r.id, r.name, r.restaurant_type);
    }

    let rows = repo
        .select_join(&queries.select_join)
        .await
        .context("Error selecting joined rows")?;
    for row in &rows {
        println!(
            "User ID: {} | Name: {} {} | Restaurant ID: {} | Restaurant Name: {} | Type: {} | Average Price: {}",
            row.user_id,
            row.user_name,
            row.user_lastname,
            row.restaurant_id,
            row.restaurant_name,
            row.restaurant_type,
            row.average_price
        );
    }

    info!(
        users = users.len(),
        restaurants = restaurants.len(),
        joined = rows.len(),
        "Done"
    );
    Ok(())
}

/// Empty slots only fail when used, so this is a warning rather than an error.
fn warn_on_missing(queries: &Queries) {
    for name in queries.missing_entries() {
        warn!(query = name, "Query catalog entry is empty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("restodb-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn missing_catalog_creates_no_database_file() {
        let dir = scratch_dir("missing-catalog");
        let db_path = dir.join("project.db");
        let cli = Cli {
            database: db_path.to_string_lossy().to_string(),
            queries: dir.join("absent.yaml"),
        };

        let err = run(cli).await.unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with("Error loading queries: Failed to load query catalog: "));
        assert_eq!(message.matches("absent.yaml").count(), 1);
        assert!(!db_path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn runs_the_shipped_catalog_end_to_end() {
        let dir = scratch_dir("end-to-end");
        let cli = Cli {
            database: dir.join("project.db").to_string_lossy().to_string(),
            queries: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/queries.yaml"),
        };

        run(cli).await.unwrap();

        assert!(dir.join("project.db").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
