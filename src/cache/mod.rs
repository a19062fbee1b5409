use crate::redis_client::RedisClient;
use tracing::info;

pub mod catalog;

/// Кеш ответов каталога. Без Redis работает как пустой кеш:
/// чтение всегда промах, запись ничего не делает.
#[derive(Clone)]
pub struct CacheService {
    redis: Option<RedisClient>,
    ttl_seconds: u64,
}

impl CacheService {
    pub fn new(redis: RedisClient, ttl_seconds: u64) -> Self {
        info!("Catalog cache enabled, ttl {}s", ttl_seconds);
        Self { redis: Some(redis), ttl_seconds }
    }

    pub fn disabled() -> Self {
        info!("Catalog cache disabled");
        Self { redis: None, ttl_seconds: 0 }
    }

    pub fn is_enabled(&self) -> bool {
        self.redis.is_some()
    }
}
