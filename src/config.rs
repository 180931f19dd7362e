use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// 文档存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    /// 仅用于本地调试，进程退出后数据丢失
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// 日期区间聚合时并发拉取的天数上限
    pub fetch_concurrency: usize,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/branch_orders";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FETCH_CONCURRENCY: usize = 8;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            },
            store: StoreConfig {
                backend: StoreBackend::Postgres,
            },
            aggregation: AggregationConfig {
                fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    ///
    /// 嵌套字段用 `__` 分隔，例如 `SERVER__PORT=9000`、`STORE__BACKEND=memory`。
    /// `DATABASE_URL` 优先级最高，覆盖 `database.url`。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(Environment::default().separator("__"))
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default(
                "database.acquire_timeout_secs",
                defaults.database.acquire_timeout_secs as i64,
            )?
            .set_default("store.backend", "postgres")?
            .set_default(
                "aggregation.fetch_concurrency",
                defaults.aggregation.fetch_concurrency as i64,
            )
    }
}
