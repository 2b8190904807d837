use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, Pool, Sqlite};
use anyhow::Result;
use std::str::FromStr;

pub mod schema;
pub mod repository;
pub mod query_builder;

pub use repository::{CatalogRepository, SqliteRepository};
pub use query_builder::CatalogQueryBuilder;

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    repository: SqliteRepository,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self> {
        tracing::info!("Connecting to database: {}", database_url);

        // 配置 SQLite 连接选项
        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(std::time::Duration::from_secs(30));

        // 列表页只读，允许多个连接并发查询
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        // Run migrations
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        // Verify schema integrity
        schema::verify_schema(&pool).await?;

        // Log database statistics
        let stats = schema::get_database_stats(&pool).await?;
        tracing::info!(
            "Database initialized - Comics: {}, Genres: {}, Series: {}, Characters: {}, Artists: {}, Size: {:.2} MB",
            stats.comic_count,
            stats.genre_count,
            stats.series_count,
            stats.character_count,
            stats.artist_count,
            stats.database_size_mb()
        );

        let repository = SqliteRepository::new(pool.clone());

        Ok(Self { pool, repository })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub fn repository(&self) -> &SqliteRepository {
        &self.repository
    }

    /// 获取数据库统计信息
    pub async fn get_stats(&self) -> Result<schema::DatabaseStats> {
        schema::get_database_stats(&self.pool).await
    }

    /// 验证数据库完整性
    pub async fn verify_integrity(&self) -> Result<()> {
        schema::verify_schema(&self.pool).await
    }
}
