//! Process-global environment mutation helpers for tests.

use std::sync::{Mutex, OnceLock};

/// Return the process-wide lock used to serialize environment mutation.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

// Newer toolchains mark env mutation as `unsafe`; callers hold `env_lock`.
#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: Callers must serialize mutation when test threads may run in parallel.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Overrides one environment variable and restores the previous value on drop.
pub struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    /// Set `key=value` until the guard is dropped.
    pub fn set(key: &str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    /// Unset `key` until the guard is dropped.
    pub fn remove(key: &str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &str, value: Option<&str>) -> Self {
        let previous = std::env::var(key).ok();
        write_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(self.key.as_str(), self.previous.as_deref());
    }
}
