use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::models::RawFilters;
use crate::services::CatalogRequest;
use crate::api::error::ApiResult;
use crate::api::response::success;
use super::AppState;

/// 列表页查询参数
///
/// 全部按字符串接收，非法值在服务层降级为默认值，不在反序列化阶段报错。
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub genres: Option<String>,
    pub series: Option<String>,
    pub characters: Option<String>,
    pub artists: Option<String>,
    pub page: Option<String>,
    pub results: Option<String>,
    pub orderby: Option<String>,
    pub r: Option<String>,
}

impl From<CatalogParams> for CatalogRequest {
    fn from(params: CatalogParams) -> Self {
        Self {
            filters: RawFilters {
                genres: params.genres,
                series: params.series,
                characters: params.characters,
                artists: params.artists,
            },
            page: params.page,
            results: params.results,
            orderby: params.orderby,
            reverse: params.r,
        }
    }
}

/// 获取目录列表页
pub async fn get_catalog_page(
    Query(params): Query<CatalogParams>,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let request = CatalogRequest::from(params);
    let page = state.catalog_service.render_page(&request).await?;
    Ok(success(page))
}
