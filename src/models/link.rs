use serde::Serialize;

use super::filter::{Dimension, FilterSelection};
use super::pagination::PageWindow;
use super::sort::{SortField, SortOrder, SortSpec};

/// 分页链接前后各显示的页码数
const PAGE_LINK_RADIUS: i64 = 5;

/// 当前请求的筛选/排序/分页状态，所有导航链接都从这里生成
///
/// 每个请求构建一次，之后只读。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    filters: FilterSelection,
    sort: Option<SortSpec>,
    page_size: i64,
    default_page_size: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLinkKind {
    First,
    Prev,
    Page,
    Next,
    Last,
}

/// 分页链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub kind: PageLinkKind,
    pub page: i64,
    pub href: String,
    pub current: bool,
}

/// 排序按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortTile {
    pub field: SortField,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

impl LinkState {
    pub fn new(
        filters: FilterSelection,
        sort: Option<SortSpec>,
        page_size: i64,
        default_page_size: i64,
    ) -> Self {
        Self {
            filters,
            sort,
            page_size,
            default_page_size,
        }
    }

    /// 按固定顺序生成查询串：orderby, r, 四个筛选, results, page
    fn href(&self, sort: Option<SortSpec>, page: Option<i64>) -> String {
        let mut params: Vec<(&'static str, String)> = Vec::new();

        if let Some(spec) = sort {
            params.push(("orderby", spec.field.token().to_string()));
            if spec.order == SortOrder::Ascending {
                params.push(("r", "1".to_string()));
            }
        }
        for dimension in Dimension::ALL {
            if let Some(id) = self.filters.get(dimension) {
                params.push((dimension.param(), id.to_string()));
            }
        }
        if self.page_size != self.default_page_size {
            params.push(("results", self.page_size.to_string()));
        }
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", query)
    }

    /// 指定页的链接，保留当前筛选和排序
    pub fn page_href(&self, page: i64) -> String {
        self.href(self.sort, Some(page))
    }

    /// 排序链接：保留筛选，回到第一页
    pub fn sort_href(&self, sort: SortSpec) -> String {
        self.href(Some(sort), None)
    }

    /// 分页链接，只有一页时为空
    pub fn pagination_links(&self, window: &PageWindow) -> Vec<PageLink> {
        if window.total_pages <= 1 {
            return Vec::new();
        }

        let mut links = Vec::new();
        let mut push = |kind: PageLinkKind, page: i64| {
            links.push(PageLink {
                kind,
                page,
                href: self.page_href(page),
                current: page == window.page,
            });
        };

        if window.has_prev() {
            push(PageLinkKind::First, 1);
            push(PageLinkKind::Prev, window.page - 1);
        }
        let start = (window.page - PAGE_LINK_RADIUS).max(1);
        let end = (window.page + PAGE_LINK_RADIUS).min(window.total_pages);
        for page in start..=end {
            push(PageLinkKind::Page, page);
        }
        if window.has_next() {
            push(PageLinkKind::Next, window.page + 1);
            push(PageLinkKind::Last, window.total_pages);
        }

        links
    }

    /// 八个排序按钮；当前排序字段的按钮切换升降序
    pub fn sort_tiles(&self) -> Vec<SortTile> {
        SortField::TILE_ORDER
            .into_iter()
            .map(|field| {
                let active = self.sort.map(|s| s.field) == Some(field);
                let order = match self.sort {
                    Some(current) if active && current.order == SortOrder::Descending => {
                        SortOrder::Ascending
                    }
                    _ => SortOrder::Descending,
                };
                SortTile {
                    field,
                    label: field.label(),
                    href: self.sort_href(SortSpec { field, order }),
                    active,
                }
            })
            .collect()
    }
}
