//! Access to the variables the loader writes and the accessor reads

use std::collections::HashMap;
use std::env;
use std::sync::{Mutex, PoisonError};

/// A key/value store of environment variables.
///
/// [`ProcessEnv`] is the real process environment. [`MemoryEnv`] keeps
/// variables in a map so a [`Loader`](crate::Loader) can be exercised
/// without touching process-wide state.
pub trait Environment {
    /// Value of `key`, or `None` when it is not set.
    fn var(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any previous value.
    fn set_var(&self, key: &str, value: &str);
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }

    fn set_var(&self, key: &str, value: &str) {
        (**self).set_var(key, value)
    }
}

/// The environment of the current process.
///
/// Writes are not synchronized; initialize before spawning threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-Unicode values are still present; report them lossily rather than as missing.
        env::var_os(key).map(|value| {
            value
                .into_string()
                .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
        })
    }

    fn set_var(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }
}

/// An in-memory environment.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: Mutex<HashMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every variable currently set.
    pub fn vars(&self) -> HashMap<String, String> {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: Mutex::new(vars),
        }
    }
}

impl Environment for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}
