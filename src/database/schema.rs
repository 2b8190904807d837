use sqlx::{Pool, Sqlite};
use anyhow::Result;

/// 验证数据库schema完整性
pub async fn verify_schema(pool: &Pool<Sqlite>) -> Result<()> {
    // 检查所有必需的表是否存在
    let required_tables = vec![
        "comics",
        "genres",
        "series",
        "characters",
        "artists",
    ];

    for table in required_tables {
        let exists = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name=?")
            .bind(table)
            .fetch_optional(pool)
            .await?;

        if exists.is_none() {
            return Err(anyhow::anyhow!("Required table '{}' does not exist", table));
        }
    }

    // 排序字段的索引
    let required_indexes = vec![
        "idx_comics_title",
        "idx_comics_views",
        "idx_comics_rating",
    ];

    for index in required_indexes {
        let exists = sqlx::query("SELECT name FROM sqlite_master WHERE type='index' AND name=?")
            .bind(index)
            .fetch_optional(pool)
            .await?;

        if exists.is_none() {
            return Err(anyhow::anyhow!("Required index '{}' does not exist", index));
        }
    }

    tracing::debug!("Database schema verification completed successfully");
    Ok(())
}

/// 获取数据库统计信息
pub async fn get_database_stats(pool: &Pool<Sqlite>) -> Result<DatabaseStats> {
    let comic_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comics")
        .fetch_one(pool)
        .await?;

    let genre_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(pool)
        .await?;

    let series_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM series")
        .fetch_one(pool)
        .await?;

    let character_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM characters")
        .fetch_one(pool)
        .await?;

    let artist_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;

    // 获取数据库文件大小
    let db_size: i64 = sqlx::query_scalar("SELECT page_count * page_size as size FROM pragma_page_count(), pragma_page_size()")
        .fetch_one(pool)
        .await?;

    Ok(DatabaseStats {
        comic_count,
        genre_count,
        series_count,
        character_count,
        artist_count,
        database_size_bytes: db_size,
    })
}

/// 数据库统计信息
#[derive(Debug)]
pub struct DatabaseStats {
    pub comic_count: i64,
    pub genre_count: i64,
    pub series_count: i64,
    pub character_count: i64,
    pub artist_count: i64,
    pub database_size_bytes: i64,
}

impl DatabaseStats {
    pub fn database_size_mb(&self) -> f64 {
        self.database_size_bytes as f64 / (1024.0 * 1024.0)
    }
}
