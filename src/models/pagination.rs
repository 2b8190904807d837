use serde::Serialize;

use super::validation::CatalogError;

/// 解析页码，缺省、无法解析或非正数时使用默认值
pub fn parse_page(raw: Option<&str>, default_page: i64) -> i64 {
    parse_positive(raw).unwrap_or(default_page)
}

/// 解析每页条数，超过上限时截断到上限而不是拒绝
pub fn parse_page_size(raw: Option<&str>, default_size: i64, max_size: i64) -> i64 {
    parse_positive(raw).unwrap_or(default_size).min(max_size)
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).filter(|v| *v > 0)
}

/// 当前页的分页窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl PageWindow {
    /// 总页数，空结果也算 1 页，保证默认第一页可以正常渲染
    pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
        let total_count = total_count.max(0);
        let page_size = page_size.max(1);
        let pages = total_count / page_size + i64::from(total_count % page_size != 0);
        pages.max(1)
    }

    /// 校验请求页码；超出总页数时返回 `PageOutOfRange`
    pub fn new(page: i64, page_size: i64, total_count: i64) -> Result<Self, CatalogError> {
        let page_size = page_size.max(1);
        let total_pages = Self::total_pages(total_count, page_size);
        if page < 1 || page > total_pages {
            return Err(CatalogError::PageOutOfRange { page, total_pages });
        }
        Ok(Self {
            page,
            page_size,
            total_count: total_count.max(0),
            total_pages,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
