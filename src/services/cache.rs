//! In-process cache of authenticated accounts.
//!
//! Every protected request resolves the caller's account row; caching it for
//! a short TTL keeps the hot auth path off the database. Mutating operations
//! must call [`UserCache::invalidate`] so stale rows are never served.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::domain::user::User;

#[derive(Clone)]
pub struct UserCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

struct CacheEntry {
    user: User,
    cached_at: Instant,
}

impl UserCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Returns the cached account for `email`, evicting it when expired.
    pub fn get(&self, email: &str) -> Option<User> {
        let expired = {
            let entry = self.entries.get(email)?;
            if entry.cached_at.elapsed() > self.ttl {
                true
            } else {
                return Some(entry.user.clone());
            }
        };

        if expired {
            self.entries.remove(email);
        }
        None
    }

    pub fn insert(&self, user: User) {
        self.entries.insert(
            user.email.clone(),
            CacheEntry {
                user,
                cached_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, email: &str) {
        self.entries.remove(email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use chrono::Utc;

    fn sample_user(email: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: 1,
            email: email.to_string(),
            password_hash: "hash".to_string(),
            full_name: "Jane Doe".to_string(),
            avatar: None,
            refresh_token: None,
            confirmed: true,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn returns_cached_entry() {
        let cache = UserCache::new(Duration::from_secs(60));
        cache.insert(sample_user("jane@example.com"));
        assert!(cache.get("jane@example.com").is_some());
    }

    #[test]
    fn expired_entry_is_evicted() {
        let cache = UserCache::new(Duration::ZERO);
        cache.insert(sample_user("jane@example.com"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("jane@example.com").is_none());
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = UserCache::new(Duration::from_secs(60));
        cache.insert(sample_user("jane@example.com"));
        cache.invalidate("jane@example.com");
        assert!(cache.get("jane@example.com").is_none());
    }
}
