use crate::models::{Dimension, Predicate, SortSpec};
use sqlx::{QueryBuilder, Sqlite};

const COUNT_SELECT: &str = "SELECT COUNT(*) FROM comics";
const PAGE_SELECT: &str = "SELECT comics_id, comics_title, comics_thumbnail FROM comics";

/// 目录查询构建器
///
/// 所有筛选值都通过 `push_bind` 绑定；排序列只来自 `SortField` 白名单。
pub struct CatalogQueryBuilder {
    query: QueryBuilder<'static, Sqlite>,
    has_where: bool,
}

impl CatalogQueryBuilder {
    /// 计数查询
    pub fn count() -> Self {
        Self {
            query: QueryBuilder::new(COUNT_SELECT),
            has_where: false,
        }
    }

    /// 分页数据查询
    pub fn page() -> Self {
        Self {
            query: QueryBuilder::new(PAGE_SELECT),
            has_where: false,
        }
    }

    pub fn with_predicate(mut self, predicate: &Predicate) -> Self {
        if predicate.is_unrestricted() {
            return self;
        }
        for condition in predicate.conditions() {
            self.add_where_clause();
            self.query.push(condition.column());
            self.query.push(" LIKE ");
            self.query.push_bind(condition.pattern());
        }
        self
    }

    pub fn with_sorting(mut self, sort: Option<&SortSpec>) -> Self {
        if let Some(spec) = sort {
            self.query.push(" ORDER BY ");
            self.query.push(spec.clause());
        }
        self
    }

    pub fn with_window(mut self, offset: i64, limit: i64) -> Self {
        self.query.push(" LIMIT ");
        self.query.push_bind(limit);
        self.query.push(" OFFSET ");
        self.query.push_bind(offset);
        self
    }

    pub fn build(self) -> QueryBuilder<'static, Sqlite> {
        self.query
    }

    fn add_where_clause(&mut self) {
        if !self.has_where {
            self.query.push(" WHERE ");
            self.has_where = true;
        } else {
            self.query.push(" AND ");
        }
    }
}

/// 维度名称查询，例如 `SELECT genres_name FROM genres WHERE genres_id = ?`
pub fn label_query(dimension: Dimension) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?",
        dimension.reference_name_column(),
        dimension.reference_table(),
        dimension.reference_id_column()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterSelection, RawFilters};

    fn predicate(genres: Option<&str>, series: Option<&str>, artists: Option<&str>) -> Predicate {
        Predicate::from_selection(&FilterSelection::parse(&RawFilters {
            genres: genres.map(String::from),
            series: series.map(String::from),
            artists: artists.map(String::from),
            ..Default::default()
        }))
    }

    fn where_part(sql: &str) -> &str {
        sql.find(" WHERE ").map(|i| &sql[i..]).unwrap_or("")
    }

    #[test]
    fn test_unrestricted_count() {
        let query = CatalogQueryBuilder::count()
            .with_predicate(&Predicate::default())
            .build();
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM comics");
    }

    #[test]
    fn test_conditions_joined_with_and() {
        let query = CatalogQueryBuilder::count()
            .with_predicate(&predicate(Some("5"), Some("0"), Some("9")))
            .build();
        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM comics WHERE comics_genres LIKE ? AND comics_artists LIKE ?"
        );
    }

    #[test]
    fn test_count_and_page_share_predicate() {
        let p = predicate(Some("1"), Some("2"), Some("3"));
        let count = CatalogQueryBuilder::count().with_predicate(&p).build();
        let page = CatalogQueryBuilder::page()
            .with_predicate(&p)
            .with_sorting(None)
            .with_window(0, 10)
            .build();

        let page_where = where_part(page.sql());
        let page_where = &page_where[..page_where.find(" LIMIT ").unwrap()];
        assert_eq!(where_part(count.sql()), page_where);
    }

    #[test]
    fn test_sorted_window() {
        let sort = SortSpec::resolve(Some("chapterscount"), Some("1"));
        let query = CatalogQueryBuilder::page()
            .with_predicate(&Predicate::default())
            .with_sorting(sort.as_ref())
            .with_window(40, 20)
            .build();
        assert_eq!(
            query.sql(),
            "SELECT comics_id, comics_title, comics_thumbnail FROM comics ORDER BY comics_chapterscount ASC, comics_id ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_label_query() {
        assert_eq!(
            label_query(Dimension::Character),
            "SELECT characters_name FROM characters WHERE characters_id = ?"
        );
    }
}
