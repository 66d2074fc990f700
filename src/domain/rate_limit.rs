use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use crate::config::RateLimitConfig;

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window request counter keyed by phone number.
///
/// Process-local and best-effort: the map is not shared across instances and
/// vanishes on restart. That is the documented contract of this anti-abuse
/// control, so no external counter store is involved.
pub struct RateLimiter {
    cfg: RateLimitConfig,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new(cfg: RateLimitConfig) -> Self {
        Self {
            cfg,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request for `key` and report whether it is allowed.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            // A poisoned lock only means another request panicked mid-check;
            // the counters are still usable.
            Err(poisoned) => poisoned.into_inner(),
        };

        match entries.get_mut(key) {
            Some(entry) if now <= entry.reset_at => {
                if entry.count >= self.cfg.max_orders {
                    return false;
                }
                entry.count += 1;
                true
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    WindowEntry {
                        count: 1,
                        reset_at: now + self.cfg.window,
                    },
                );
                true
            }
        }
    }
}
