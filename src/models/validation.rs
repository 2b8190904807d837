use thiserror::Error;

/// 目录列表请求中的错误
///
/// 前三种属于校验类错误，在本地降级处理（记录日志后忽略）；
/// 后两种会终止请求。
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid value for filter '{dimension}': {value}")]
    InvalidFilterValue { dimension: &'static str, value: String },

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("No {dimension} label for id {id}")]
    LabelLookupMiss { dimension: &'static str, id: i64 },

    #[error("Invalid page: {page} (total pages: {total_pages})")]
    PageOutOfRange { page: i64, total_pages: i64 },

    #[error("Data store unavailable: {0}")]
    DataStoreUnavailable(anyhow::Error),
}
