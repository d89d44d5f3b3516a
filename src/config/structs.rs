use serde::Deserialize;

/// 门户配置，对应 default.toml 的各个表
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub argon2: Argon2Config,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    /// development / production，生产环境隐藏内部错误信息
    pub environment: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 为空时监听 TCP
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核数决定
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 以毫秒计，keep_alive 以秒计
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitConfig {
    /// JSON 请求体上限（字节）
    pub max_payload_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlite 文件路径或 postgres:// / mysql:// 连接串
    pub url: String,
    pub pool_size: u32,
    /// 连接超时（秒）
    pub timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 缓存后端插件名：moka 或 redis
    #[serde(rename = "type")]
    pub cache_type: String,
    /// 默认过期时间（秒）
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// 包含 "*" 时允许任意来源
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// 课程资料上传
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub dir: String,
    /// 单文件上限（字节）
    pub max_size: usize,
    /// 小写且带点号，例如 ".pdf"
    pub allowed_extensions: Vec<String>,
}

/// Argon2id 参数
#[derive(Debug, Clone, Deserialize)]
pub struct Argon2Config {
    /// KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}
