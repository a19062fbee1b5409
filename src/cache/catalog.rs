use crate::cache::CacheService;
use redis::AsyncCommands;
use tracing::info;

const CATALOG_PREFIX: &str = "catalog:";

/// Ключ кеша для ответа каталога: вид ответа + параметры запроса.
pub fn catalog_key(kind: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}{}:{}", CATALOG_PREFIX, kind, query)
}

impl CacheService {
    /// Получает закешированный ответ по ключу.
    pub async fn get_cached(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let Some(redis) = &self.redis else {
            return Ok(None);
        };
        let mut conn = redis.conn.clone();
        conn.get(key).await
    }

    /// Сохраняет ответ в кеш на настроенный TTL.
    pub async fn cache_response(&self, key: &str, value: &str) -> Result<(), redis::RedisError> {
        let Some(redis) = &self.redis else {
            return Ok(());
        };
        let mut conn = redis.conn.clone();
        conn.set_ex(key, value, self.ttl_seconds).await
    }

    /// Сбрасывает все ответы каталога (после изменения данных каталога).
    pub async fn invalidate_catalog(&self) -> Result<usize, redis::RedisError> {
        let Some(redis) = &self.redis else {
            return Ok(0);
        };
        let mut conn = redis.conn.clone();
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("{}*", CATALOG_PREFIX))
            .query_async(&mut conn)
            .await?;
        if !keys.is_empty() {
            let _: () = conn.del(&keys).await?;
        }
        info!("Invalidated {} catalog cache entries", keys.len());
        Ok(keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_contains_kind_and_params_in_order() {
        let key = catalog_key("movies", &[("category", "Action"), ("p", "2"), ("ps", "20")]);
        assert_eq!(key, "catalog:movies:category=Action&p=2&ps=20");
    }

    #[tokio::test]
    async fn disabled_cache_always_misses() {
        let cache = CacheService::disabled();
        assert!(!cache.is_enabled());
        cache.cache_response("catalog:genres:", "[]").await.unwrap();
        assert_eq!(cache.get_cached("catalog:genres:").await.unwrap(), None);
        assert_eq!(cache.invalidate_catalog().await.unwrap(), 0);
    }
}
