use sea_orm::{Database, DatabaseConnection, DbErr};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(path) if path == ":memory:" => "sqlite::memory:".to_string(),
        // mode=rwc so a missing database file is created on first connect
        Some(path) => format!("sqlite:{}?mode=rwc", path),
        None => "sqlite:vizcatalog.db?mode=rwc".to_string(),
    }
}
