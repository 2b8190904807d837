use super::filter::{Dimension, FilterSelection, ResolvedFilter};

/// 单个维度的成员匹配条件：`<column> LIKE '%/<id>/%'`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipCondition {
    pub dimension: Dimension,
    pub id: i64,
}

impl MembershipCondition {
    pub fn column(&self) -> &'static str {
        self.dimension.column()
    }

    /// LIKE 模式，作为绑定参数传入，不拼接进 SQL
    pub fn pattern(&self) -> String {
        format!("%/{}/%", self.id)
    }
}

/// 所有已启用筛选条件的合取（AND）
///
/// 计数查询和分页查询必须使用同一个 `Predicate`，否则总数与分页会不一致。
/// 没有任何条件时表示不限制。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<MembershipCondition>,
}

impl Predicate {
    pub fn from_selection(selection: &FilterSelection) -> Self {
        Self {
            conditions: selection
                .active()
                .map(|(dimension, id)| MembershipCondition { dimension, id })
                .collect(),
        }
    }

    pub fn from_filters(filters: &[ResolvedFilter]) -> Self {
        Self {
            conditions: filters
                .iter()
                .map(|f| MembershipCondition {
                    dimension: f.dimension,
                    id: f.id,
                })
                .collect(),
        }
    }

    pub fn conditions(&self) -> &[MembershipCondition] {
        &self.conditions
    }

    pub fn is_unrestricted(&self) -> bool {
        self.conditions.is_empty()
    }
}
