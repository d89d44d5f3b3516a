use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";
const DEFAULT_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按名称构造缓存后端
async fn build_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(cache_type).ok_or_else(|| {
        PortalError::cache_plugin_not_found(format!("Cache backend '{cache_type}' not found in registry"))
    })?;
    constructor().await.map(Arc::from)
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != DEFAULT_CACHE => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to memory cache");
            let cache = build_cache(DEFAULT_CACHE).await?;
            warn!("Successfully created fallback Moka (in-memory) cache backend");
            Ok(cache)
        }
        Err(e) => Err(e),
    }
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号
pub(crate) async fn seed_admin(storage: &dyn Storage) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password: password_hash,
        full_name: "Administrator".to_string(),
        role: UserRole::Admin,
        group_name: None,
        avatar_url: None,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存与默认管理员
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(storage.as_ref()).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::fixtures;

    #[test]
    fn test_generated_password_length() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }

    #[tokio::test]
    async fn test_seed_admin_only_on_empty_store() {
        let storage = fixtures::storage().await;

        seed_admin(&storage).await;
        seed_admin(&storage).await;

        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage
            .get_user_by_email(DEFAULT_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.full_name, "Administrator");
    }

    #[tokio::test]
    async fn test_create_cache_uses_configured_backend() {
        let cache = create_cache().await.unwrap();
        cache
            .insert_raw("startup:roundtrip".to_string(), "1".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_raw("startup:roundtrip").await,
            crate::cache::CacheResult::Found("1".to_string())
        );
    }
}
