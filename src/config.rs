use std::env;

/// 目录服务配置，从环境变量读取（启动时先由 dotenv 加载 .env）
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// 站点域名，用于拼接详情页和缩略图 URL（不带末尾 `/`）
    pub domain: String,
    pub default_page: i64,
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// 设置后 `/api/catalog` 需要携带 `x-session-token`
    pub session_token: Option<String>,
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            domain: "http://localhost:3000".to_string(),
            default_page: 1,
            default_page_size: 24,
            max_page_size: 100,
            session_token: None,
            database_url: "sqlite:./catalog.db?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取，便于测试
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_page_size = parse_or("MAX_RESULTS", lookup("MAX_RESULTS"), defaults.max_page_size).max(1);
        let default_page_size = parse_or("DEFAULT_RESULTS", lookup("DEFAULT_RESULTS"), defaults.default_page_size)
            .clamp(1, max_page_size);
        let default_page = parse_or("DEFAULT_PAGE", lookup("DEFAULT_PAGE"), defaults.default_page).max(1);

        let domain = lookup("CATALOG_DOMAIN")
            .map(|d| d.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.domain);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            domain,
            default_page,
            default_page_size,
            max_page_size,
            session_token: lookup("SESSION_TOKEN").filter(|t| !t.trim().is_empty()),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
        }
    }
}

fn parse_or(key: &str, raw: Option<String>, default: i64) -> i64 {
    match raw {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("Invalid {} '{}', using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
