use std::path::{Path, PathBuf};
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    // The SQLite file may live in a directory that does not exist yet.
    if let Some(dir) = sqlite_parent_dir(db_url) {
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DbErr::Custom(format!("failed to create {}: {e}", dir.display())))?;
    }

    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(16)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("scansheet::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

fn sqlite_parent_dir(url: &str) -> Option<PathBuf> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
