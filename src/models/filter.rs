use serde::Serialize;

use super::validation::CatalogError;

/// 筛选维度（题材、系列、角色、作者）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Genre,
    Series,
    Character,
    Artist,
}

impl Dimension {
    /// 固定的维度顺序，查询、标题和链接都按这个顺序处理
    pub const ALL: [Dimension; 4] = [
        Dimension::Genre,
        Dimension::Series,
        Dimension::Character,
        Dimension::Artist,
    ];

    /// 请求参数名
    pub fn param(&self) -> &'static str {
        match self {
            Dimension::Genre => "genres",
            Dimension::Series => "series",
            Dimension::Character => "characters",
            Dimension::Artist => "artists",
        }
    }

    /// comics 表中保存该维度 id 列表的列，格式为 `/3/17/42/`
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Genre => "comics_genres",
            Dimension::Series => "comics_series",
            Dimension::Character => "comics_characters",
            Dimension::Artist => "comics_artists",
        }
    }

    /// 名称查询使用的参考表
    pub fn reference_table(&self) -> &'static str {
        match self {
            Dimension::Genre => "genres",
            Dimension::Series => "series",
            Dimension::Character => "characters",
            Dimension::Artist => "artists",
        }
    }

    pub fn reference_id_column(&self) -> &'static str {
        match self {
            Dimension::Genre => "genres_id",
            Dimension::Series => "series_id",
            Dimension::Character => "characters_id",
            Dimension::Artist => "artists_id",
        }
    }

    pub fn reference_name_column(&self) -> &'static str {
        match self {
            Dimension::Genre => "genres_name",
            Dimension::Series => "series_name",
            Dimension::Character => "characters_name",
            Dimension::Artist => "artists_name",
        }
    }
}

/// 原始筛选参数（未经校验）
#[derive(Debug, Clone, Default)]
pub struct RawFilters {
    pub genres: Option<String>,
    pub series: Option<String>,
    pub characters: Option<String>,
    pub artists: Option<String>,
}

impl RawFilters {
    fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Genre => self.genres.as_deref(),
            Dimension::Series => self.series.as_deref(),
            Dimension::Character => self.characters.as_deref(),
            Dimension::Artist => self.artists.as_deref(),
        }
    }
}

/// 校验后的筛选条件，每个维度独立可选，值一定为正整数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub genre: Option<i64>,
    pub series: Option<i64>,
    pub character: Option<i64>,
    pub artist: Option<i64>,
}

impl FilterSelection {
    /// 从原始参数解析
    ///
    /// 空值和 0 表示未启用；无法解析或为负数的值视为未启用并记录警告，
    /// 不会让整个请求失败。
    pub fn parse(raw: &RawFilters) -> Self {
        let mut selection = Self::default();
        for dimension in Dimension::ALL {
            let Some(value) = raw.get(dimension) else {
                continue;
            };
            match parse_filter_id(dimension, value) {
                Ok(Some(id)) => selection.set(dimension, id),
                Ok(None) => {}
                Err(e) => tracing::warn!("Ignoring filter: {}", e),
            }
        }
        selection
    }

    pub fn get(&self, dimension: Dimension) -> Option<i64> {
        match dimension {
            Dimension::Genre => self.genre,
            Dimension::Series => self.series,
            Dimension::Character => self.character,
            Dimension::Artist => self.artist,
        }
    }

    fn set(&mut self, dimension: Dimension, id: i64) {
        let slot = match dimension {
            Dimension::Genre => &mut self.genre,
            Dimension::Series => &mut self.series,
            Dimension::Character => &mut self.character,
            Dimension::Artist => &mut self.artist,
        };
        *slot = Some(id);
    }

    /// 按固定维度顺序返回已启用的 (维度, id)
    pub fn active(&self) -> impl Iterator<Item = (Dimension, i64)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(|dimension| self.get(dimension).map(|id| (dimension, id)))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// 解析单个筛选值：`Ok(None)` 表示未启用
fn parse_filter_id(dimension: Dimension, value: &str) -> Result<Option<i64>, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<i64>() {
        Ok(0) => Ok(None),
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(CatalogError::InvalidFilterValue {
            dimension: dimension.param(),
            value: value.to_string(),
        }),
    }
}

/// 已解析名称的筛选条件
///
/// 名称查不到时 `label` 为空字符串，但筛选仍然参与查询。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFilter {
    pub dimension: Dimension,
    pub id: i64,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(genres: &str, series: &str, characters: &str, artists: &str) -> RawFilters {
        let opt = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
        RawFilters {
            genres: opt(genres),
            series: opt(series),
            characters: opt(characters),
            artists: opt(artists),
        }
    }

    #[test]
    fn test_zero_and_empty_are_inactive() {
        let selection = FilterSelection::parse(&raw("5", "0", "", ""));
        assert_eq!(selection.genre, Some(5));
        assert_eq!(selection.series, None);
        assert_eq!(selection.active().count(), 1);
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let selection = FilterSelection::parse(&raw("abc", "-3", "7x", " 12 "));
        assert_eq!(selection.genre, None);
        assert_eq!(selection.series, None);
        assert_eq!(selection.character, None);
        assert_eq!(selection.artist, Some(12));
    }

    #[test]
    fn test_active_keeps_dimension_order() {
        let selection = FilterSelection::parse(&raw("1", "2", "3", "4"));
        let dims: Vec<Dimension> = selection.active().map(|(d, _)| d).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
    }

    #[test]
    fn test_no_filters() {
        let selection = FilterSelection::parse(&RawFilters::default());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_parse_filter_id_error() {
        let err = parse_filter_id(Dimension::Artist, "x1").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFilterValue { dimension: "artists", .. }));
    }
}
