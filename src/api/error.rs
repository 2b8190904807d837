use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::models::CatalogError;

/// 统一的API错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 页码超出范围
    PageOutOfRange(String),
    /// 未登录或会话无效
    Unauthorized(String),
    /// 内部服务器错误
    Internal(String),
    /// 请求参数错误
    BadRequest(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::PageOutOfRange(msg) => write!(f, "Page out of range: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// 从目录错误转换；校验类错误在服务内部已经降级，正常情况下只会收到终止类错误
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::PageOutOfRange { .. } => ApiError::PageOutOfRange(err.to_string()),
            CatalogError::DataStoreUnavailable(e) => {
                ApiError::Internal(format!("Data store unavailable: {:#}", e))
            }
            CatalogError::InvalidFilterValue { .. }
            | CatalogError::UnknownSortField(_)
            | CatalogError::LabelLookupMiss { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

/// 实现IntoResponse，将错误转换为HTTP响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::PageOutOfRange(ref msg) => {
                (StatusCode::NOT_FOUND, "page_out_of_range", msg.clone())
            }
            ApiError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            ApiError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal server error occurred".to_string(),
                )
            }
            ApiError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
