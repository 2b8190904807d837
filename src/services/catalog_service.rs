use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::database::CatalogRepository;
use crate::models::{
    parse_page, parse_page_size, CatalogError, CatalogItem, CatalogPage, Dimension,
    FilterSelection, LinkState, PageSummary, PageWindow, Predicate, RawFilters, ResolvedFilter,
    SortSpec,
};

/// 列表请求参数（原始字符串，由服务统一校验）
#[derive(Debug, Clone, Default)]
pub struct CatalogRequest {
    pub filters: RawFilters,
    pub page: Option<String>,
    pub results: Option<String>,
    pub orderby: Option<String>,
    pub reverse: Option<String>,
}

/// 目录列表服务层
///
/// 一次请求依次执行：名称查询（0-4 次）、计数、页码校验、分页查询，
/// 全部成功后才组装页面模型。
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
    config: Arc<CatalogConfig>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>, config: Arc<CatalogConfig>) -> Self {
        Self { repository, config }
    }

    /// 为每个已启用的维度查询名称，查不到时名称为空但筛选保留
    pub async fn resolve_filters(
        &self,
        selection: &FilterSelection,
    ) -> Result<Vec<ResolvedFilter>, CatalogError> {
        let mut resolved = Vec::new();
        for (dimension, id) in selection.active() {
            let label = self
                .repository
                .lookup_label(dimension, id)
                .await
                .map_err(CatalogError::DataStoreUnavailable)?;

            let label = label.unwrap_or_else(|| {
                tracing::debug!(
                    "{}",
                    CatalogError::LabelLookupMiss {
                        dimension: dimension.param(),
                        id
                    }
                );
                String::new()
            });

            resolved.push(ResolvedFilter { dimension, id, label });
        }
        Ok(resolved)
    }

    /// 生成完整的列表页模型
    pub async fn render_page(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError> {
        let selection = FilterSelection::parse(&request.filters);
        let sort = SortSpec::resolve(request.orderby.as_deref(), request.reverse.as_deref());
        let page_size = parse_page_size(
            request.results.as_deref(),
            self.config.default_page_size,
            self.config.max_page_size,
        );
        let page = parse_page(request.page.as_deref(), self.config.default_page);

        let filters = self.resolve_filters(&selection).await?;
        let predicate = Predicate::from_filters(&filters);

        let total = self
            .repository
            .count_matching(&predicate)
            .await
            .map_err(CatalogError::DataStoreUnavailable)?;

        let window = PageWindow::new(page, page_size, total).map_err(|e| {
            tracing::info!("Rejecting catalog request: {}", e);
            e
        })?;

        let rows = self
            .repository
            .fetch_page(&predicate, sort.as_ref(), window.offset(), window.limit())
            .await
            .map_err(CatalogError::DataStoreUnavailable)?;

        tracing::debug!(
            "Catalog page {}/{} ({} of {} items, {} filters)",
            window.page,
            window.total_pages,
            rows.len(),
            window.total_count,
            filters.len()
        );

        let links = LinkState::new(selection, sort, page_size, self.config.default_page_size);

        Ok(CatalogPage {
            heading: heading(&filters),
            sort,
            summary: PageSummary::from(&window),
            items: rows
                .into_iter()
                .map(|row| CatalogItem::from_row(row, &self.config.domain))
                .collect(),
            pagination: links.pagination_links(&window),
            sort_tiles: links.sort_tiles(),
            filters,
        })
    }
}

/// 标题：四个维度名称用 `/` 连接，未启用的维度留空；没有筛选时不显示
fn heading(filters: &[ResolvedFilter]) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    let labels: Vec<&str> = Dimension::ALL
        .iter()
        .map(|dimension| {
            filters
                .iter()
                .find(|f| f.dimension == *dimension)
                .map(|f| f.label.as_str())
                .unwrap_or("")
        })
        .collect();
    Some(labels.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogRow, PageLinkKind, SortField};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Lookup(Dimension, i64),
        Count(Predicate),
        Fetch(Predicate, Option<SortSpec>, i64, i64),
    }

    /// 记录调用的内存仓库
    #[derive(Default)]
    struct RecordingRepository {
        total: i64,
        labels: HashMap<(Dimension, i64), String>,
        rows: Vec<CatalogRow>,
        fail_count: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingRepository {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogRepository for RecordingRepository {
        async fn count_matching(&self, predicate: &Predicate) -> Result<i64> {
            self.calls.lock().unwrap().push(Call::Count(predicate.clone()));
            if self.fail_count {
                return Err(anyhow::anyhow!("connection refused"));
            }
            Ok(self.total)
        }

        async fn lookup_label(&self, dimension: Dimension, id: i64) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(Call::Lookup(dimension, id));
            Ok(self.labels.get(&(dimension, id)).cloned())
        }

        async fn fetch_page(
            &self,
            predicate: &Predicate,
            sort: Option<&SortSpec>,
            offset: i64,
            limit: i64,
        ) -> Result<Vec<CatalogRow>> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Fetch(predicate.clone(), sort.copied(), offset, limit));
            Ok(self.rows.iter().skip(offset as usize).take(limit as usize).cloned().collect())
        }
    }

    fn rows(n: i64) -> Vec<CatalogRow> {
        (1..=n)
            .map(|id| CatalogRow {
                id,
                title: format!("Comic {}", id),
                thumbnail: format!("{}.jpg", id),
            })
            .collect()
    }

    fn service(repo: Arc<RecordingRepository>) -> CatalogService {
        let config = CatalogConfig {
            domain: "https://example.org".to_string(),
            default_page_size: 10,
            max_page_size: 20,
            ..CatalogConfig::default()
        };
        CatalogService::new(repo, Arc::new(config))
    }

    fn request(pairs: &[(&str, &str)]) -> CatalogRequest {
        let get = |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string());
        CatalogRequest {
            filters: RawFilters {
                genres: get("genres"),
                series: get("series"),
                characters: get("characters"),
                artists: get("artists"),
            },
            page: get("page"),
            results: get("results"),
            orderby: get("orderby"),
            reverse: get("r"),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_renders_first_page() {
        let repo = Arc::new(RecordingRepository::default());
        let page = service(repo.clone()).render_page(&request(&[])).await.unwrap();

        assert_eq!(page.summary.total_pages, 1);
        assert_eq!(page.summary.page, 1);
        assert!(page.items.is_empty());
        assert!(page.pagination.is_empty());
        assert!(page.heading.is_none());
        assert_eq!(page.sort_tiles.len(), 8);
    }

    #[tokio::test]
    async fn test_page_out_of_range_skips_page_query() {
        let repo = Arc::new(RecordingRepository {
            total: 15,
            rows: rows(15),
            ..Default::default()
        });
        let err = service(repo.clone())
            .render_page(&request(&[("page", "3")]))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::PageOutOfRange { page: 3, total_pages: 2 }));
        assert!(repo.calls().iter().all(|c| !matches!(c, Call::Fetch(..))));
    }

    #[tokio::test]
    async fn test_count_and_fetch_use_same_predicate() {
        let mut labels = HashMap::new();
        labels.insert((Dimension::Genre, 5), "Action".to_string());
        labels.insert((Dimension::Artist, 9), "Someone".to_string());
        let repo = Arc::new(RecordingRepository {
            total: 30,
            rows: rows(30),
            labels,
            ..Default::default()
        });

        let page = service(repo.clone())
            .render_page(&request(&[
                ("genres", "5"),
                ("series", "0"),
                ("characters", "7"),
                ("artists", "9"),
                ("page", "2"),
                ("orderby", "views"),
            ]))
            .await
            .unwrap();

        let calls = repo.calls();
        assert_eq!(
            &calls[..3],
            &[
                Call::Lookup(Dimension::Genre, 5),
                Call::Lookup(Dimension::Character, 7),
                Call::Lookup(Dimension::Artist, 9),
            ]
        );
        let (Call::Count(counted), Call::Fetch(fetched, sort, offset, limit)) = (&calls[3], &calls[4]) else {
            panic!("unexpected calls: {:?}", calls);
        };
        assert_eq!(counted, fetched);
        assert_eq!(counted.conditions().len(), 3);
        assert_eq!(sort.as_ref().map(|s| s.field), Some(SortField::ViewCount));
        assert_eq!((*offset, *limit), (10, 10));

        // 查不到名称的角色仍然参与筛选，只是名称为空
        assert_eq!(page.heading.as_deref(), Some("Action///Someone"));
        assert_eq!(page.items[0].id, 11);
        assert_eq!(page.items[0].detail_url, "https://example.org/c/11");
    }

    #[tokio::test]
    async fn test_page_size_clamped() {
        let repo = Arc::new(RecordingRepository {
            total: 100,
            rows: rows(100),
            ..Default::default()
        });
        let page = service(repo.clone())
            .render_page(&request(&[("results", "500")]))
            .await
            .unwrap();

        assert_eq!(page.summary.page_size, 20);
        assert_eq!(page.summary.total_pages, 5);
        assert_eq!(page.items.len(), 20);
    }

    #[tokio::test]
    async fn test_pagination_links_carry_state() {
        let repo = Arc::new(RecordingRepository {
            total: 45,
            rows: rows(45),
            ..Default::default()
        });
        let page = service(repo)
            .render_page(&request(&[("genres", "5"), ("orderby", "rating"), ("r", "1"), ("page", "2")]))
            .await
            .unwrap();

        let next = page
            .pagination
            .iter()
            .find(|l| l.kind == PageLinkKind::Next)
            .unwrap();
        assert_eq!(next.href, "?orderby=rating&r=1&genres=5&page=3");
        assert!(page.sort_tiles.iter().all(|t| t.href.contains("genres=5")));
    }

    #[tokio::test]
    async fn test_unknown_sort_falls_back() {
        let repo = Arc::new(RecordingRepository {
            total: 5,
            rows: rows(5),
            ..Default::default()
        });
        let page = service(repo.clone())
            .render_page(&request(&[("orderby", "comics_title; --")]))
            .await
            .unwrap();

        assert!(page.sort.is_none());
        assert!(repo
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Fetch(_, None, 0, 10))));
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let repo = Arc::new(RecordingRepository {
            fail_count: true,
            ..Default::default()
        });
        let err = service(repo.clone()).render_page(&request(&[])).await.unwrap_err();

        assert!(matches!(err, CatalogError::DataStoreUnavailable(_)));
        assert!(repo.calls().iter().all(|c| !matches!(c, Call::Fetch(..))));
    }
}
