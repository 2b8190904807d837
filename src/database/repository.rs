use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use anyhow::Result;

use crate::models::{CatalogRow, Dimension, Predicate, SortSpec};
use super::query_builder::{label_query, CatalogQueryBuilder};

/// 目录数据仓库接口
///
/// 核心逻辑只依赖这个 trait，不关心具体存储。
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// 满足条件的条目总数
    async fn count_matching(&self, predicate: &Predicate) -> Result<i64>;

    /// 查询维度 id 对应的名称，不存在时返回 `None`
    async fn lookup_label(&self, dimension: Dimension, id: i64) -> Result<Option<String>>;

    /// 按条件、排序和窗口取一页数据
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CatalogRow>>;
}

/// SQLite 数据库仓库实现
#[derive(Clone)]
pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for SqliteRepository {
    async fn count_matching(&self, predicate: &Predicate) -> Result<i64> {
        let mut query = CatalogQueryBuilder::count()
            .with_predicate(predicate)
            .build();

        let total = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn lookup_label(&self, dimension: Dimension, id: i64) -> Result<Option<String>> {
        let sql = label_query(dimension);
        let label = sqlx::query_scalar::<_, String>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(label)
    }

    async fn fetch_page(
        &self,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CatalogRow>> {
        let mut query = CatalogQueryBuilder::page()
            .with_predicate(predicate)
            .with_sorting(sort)
            .with_window(offset, limit)
            .build();

        let rows = query
            .build_query_as::<CatalogRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
