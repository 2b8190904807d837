use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::AppState;
use super::error::ApiError;

/// 会话令牌请求头
pub const SESSION_HEADER: &str = "x-session-token";

/// 会话检查：配置了 `SESSION_TOKEN` 时，请求必须携带相同的令牌
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.config.session_token.as_deref() {
        let provided = request
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok());

        let valid = provided.is_some_and(|token| tokens_match(token.as_bytes(), expected.as_bytes()));
        if !valid {
            tracing::debug!("Rejected request to {} without a valid session", request.uri().path());
            return Err(ApiError::Unauthorized("You are not logged in".to_string()));
        }
    }

    Ok(next.run(request).await)
}

/// 逐字节比较令牌，耗时与第一个不同字节的位置无关（长度不同时直接返回）
fn tokens_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
