use serde::Serialize;

use super::validation::CatalogError;

/// 可排序字段（白名单）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Title,
    CommentCount,
    ViewCount,
    BookmarkCount,
    Rating,
    RatingCount,
    ChapterCount,
}

impl SortField {
    /// 排序按钮的显示顺序
    pub const TILE_ORDER: [SortField; 8] = [
        SortField::Title,
        SortField::Id,
        SortField::CommentCount,
        SortField::ViewCount,
        SortField::BookmarkCount,
        SortField::Rating,
        SortField::RatingCount,
        SortField::ChapterCount,
    ];

    /// 请求参数 `orderby` 的取值
    pub fn token(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::CommentCount => "commentcount",
            SortField::ViewCount => "views",
            SortField::BookmarkCount => "bookmarkedcount",
            SortField::Rating => "rating",
            SortField::RatingCount => "ratingcount",
            SortField::ChapterCount => "chapterscount",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::TILE_ORDER.into_iter().find(|f| f.token() == token)
    }

    /// comics 表中的列名，ORDER BY 只使用这里的值
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "comics_id",
            SortField::Title => "comics_title",
            SortField::CommentCount => "comics_commentcount",
            SortField::ViewCount => "comics_views",
            SortField::BookmarkCount => "comics_bookmarkedcount",
            SortField::Rating => "comics_rating",
            SortField::RatingCount => "comics_ratingcount",
            SortField::ChapterCount => "comics_chapterscount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "name",
            SortField::CommentCount => "comments",
            SortField::ViewCount => "views",
            SortField::BookmarkCount => "bookmarked",
            SortField::Rating => "rating",
            SortField::RatingCount => "ratingc",
            SortField::ChapterCount => "chaptersc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// 默认降序，只有 `r` 为正数时升序
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.and_then(|r| r.trim().parse::<i64>().ok()) {
            Some(r) if r > 0 => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    /// 解析排序参数
    ///
    /// 不在白名单内的字段返回 `None`（使用存储的默认顺序），不视为错误。
    pub fn resolve(orderby: Option<&str>, reverse: Option<&str>) -> Option<Self> {
        let token = orderby?.trim();
        if token.is_empty() {
            return None;
        }
        match SortField::from_token(token) {
            Some(field) => Some(Self {
                field,
                order: SortOrder::from_flag(reverse),
            }),
            None => {
                tracing::debug!("{}", CatalogError::UnknownSortField(token.to_string()));
                None
            }
        }
    }

    /// ORDER BY 子句（不含关键字 ORDER BY）
    ///
    /// 非唯一列追加 `comics_id` 作为次级排序，保证翻页时顺序稳定。
    pub fn clause(&self) -> String {
        let keyword = self.order.keyword();
        match self.field {
            SortField::Id => format!("{} {}", self.field.column(), keyword),
            field => format!("{} {}, comics_id {}", field.column(), keyword, keyword),
        }
    }
}
