use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::filter::ResolvedFilter;
use super::link::{PageLink, SortTile};
use super::pagination::PageWindow;
use super::sort::SortSpec;

/// 分页查询返回的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CatalogRow {
    #[sqlx(rename = "comics_id")]
    pub id: i64,
    #[sqlx(rename = "comics_title")]
    pub title: String,
    #[sqlx(rename = "comics_thumbnail")]
    pub thumbnail: String,
}

/// 列表项响应DTO
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    pub thumbnail_url: String,
    pub detail_url: String,
}

impl CatalogItem {
    /// 所有 URL 都以配置的站点域名为前缀
    pub fn from_row(row: CatalogRow, domain: &str) -> Self {
        Self {
            thumbnail_url: format!("{}/thumbnails/{}", domain, row.thumbnail),
            detail_url: format!("{}/c/{}", domain, row.id),
            id: row.id,
            title: row.title,
        }
    }
}

/// 统计摘要：总数/每页~总页数/当前页
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub total_count: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub page: i64,
}

impl From<&PageWindow> for PageSummary {
    fn from(window: &PageWindow) -> Self {
        Self {
            total_count: window.total_count,
            page_size: window.page_size,
            total_pages: window.total_pages,
            page: window.page,
        }
    }
}

/// 目录列表页模型，交给展示层渲染
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    /// 有筛选时的标题，如 `Action/Saga//Someone`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub filters: Vec<ResolvedFilter>,
    pub sort: Option<SortSpec>,
    pub summary: PageSummary,
    pub items: Vec<CatalogItem>,
    pub pagination: Vec<PageLink>,
    pub sort_tiles: Vec<SortTile>,
}
