use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "divvy={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = match &settings.server.database {
        Database::Memory => {
            tracing::warn!("using in-memory storage, data is lost on exit");
            engine::Engine::builder().build()
        }
        Database::Sqlite(path) => {
            let db = connect_sqlite(path).await?;
            tracing::info!("using sqlite database at {path}");
            engine::Engine::builder().database(db).build()
        }
    };

    let listener = tokio::net::TcpListener::bind(settings.server.address()).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn connect_sqlite(
    path: &str,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(format!("sqlite:{path}?mode=rwc")).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
