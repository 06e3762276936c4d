//! Resolve, load and read back environment files

use crate::env::{Environment, ProcessEnv};
use crate::error::EnvError;
use crate::resolve::{resolve_env_file_path, resolve_env_file_path_from};
use crate::source::{DotenvSource, Dotenvy};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Filename searched for by [`init`] and [`Loader::init`].
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// Look for [`DEFAULT_ENV_FILE`] and load its variables into the process environment.
///
/// Variables that are already set keep their current value.
///
/// # Errors
///
/// Fails with [`EnvError::CwdFailure`], [`EnvError::CantAccessFile`],
/// [`EnvError::NoEnvFile`] or [`EnvError::CantLoadFile`].
pub fn init() -> Result<(), EnvError> {
    Loader::new().init().map(drop)
}

/// Look for `filename` and load its variables into the process environment.
///
/// # Errors
///
/// Same as [`init`].
pub fn init_from_file(filename: impl AsRef<Path>) -> Result<(), EnvError> {
    Loader::new().init_from_file(filename).map(drop)
}

/// Value of `key` in the process environment.
///
/// # Errors
///
/// [`EnvError::NoSuchVar`] if the variable is not set. An empty value is
/// returned as `Ok("")`.
pub fn get_env(key: &str) -> Result<String, EnvError> {
    Loader::new().get_env(key)
}

/// Configurable counterpart of [`init`], [`init_from_file`] and [`get_env`].
///
/// ```rust
/// use getenv::{ErrorCode, Loader, MemoryEnv};
/// # fn main() -> anyhow::Result<()> {
/// # let dir = tempfile::tempdir()?;
/// # std::fs::write(dir.path().join(".env.local"), "DATABASE_URL=postgres://localhost/db\n")?;
/// let loader = Loader::new()
///     .with_env(MemoryEnv::new())
///     .start_dir(dir.path());
///
/// loader.init()?;
/// assert_eq!(loader.get_env("DATABASE_URL")?, "postgres://localhost/db");
/// assert_eq!(
///     loader.get_env("MISSING").unwrap_err().code(),
///     ErrorCode::NoSuchVar
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Loader<E = ProcessEnv, S = Dotenvy> {
    env: E,
    source: S,
    start_dir: Option<PathBuf>,
    override_existing: bool,
}

impl Loader {
    /// Loader over the process environment, parsing with `dotenvy` and
    /// searching from the working directory.
    pub fn new() -> Self {
        Self {
            env: ProcessEnv,
            source: Dotenvy,
            start_dir: None,
            override_existing: false,
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> Loader<E, S>
where
    E: Environment,
    S: DotenvSource,
{
    /// Read and write variables through `env` instead.
    pub fn with_env<E2: Environment>(self, env: E2) -> Loader<E2, S> {
        Loader {
            env,
            source: self.source,
            start_dir: self.start_dir,
            override_existing: self.override_existing,
        }
    }

    /// Parse files with `source` instead.
    pub fn with_source<S2: DotenvSource>(self, source: S2) -> Loader<E, S2> {
        Loader {
            env: self.env,
            source,
            start_dir: self.start_dir,
            override_existing: self.override_existing,
        }
    }

    /// Start the search from `dir` instead of the working directory.
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Whether values from the file replace variables that are already set.
    ///
    /// Defaults to `false`.
    pub fn override_existing(mut self, enabled: bool) -> Self {
        self.override_existing = enabled;
        self
    }

    /// The environment variables are read from and written to.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Load [`DEFAULT_ENV_FILE`], returning the path it was found at.
    pub fn init(&self) -> Result<PathBuf, EnvError> {
        self.init_from_file(DEFAULT_ENV_FILE)
    }

    /// Load `filename`, returning the path it was found at.
    ///
    /// The file is parsed completely before any variable is written, so a
    /// file that fails to load leaves the environment unchanged.
    pub fn init_from_file(&self, filename: impl AsRef<Path>) -> Result<PathBuf, EnvError> {
        let filename = filename.as_ref();
        let path = match &self.start_dir {
            Some(dir) => resolve_env_file_path_from(dir, filename)?,
            None => resolve_env_file_path(filename)?,
        };

        let pairs = self
            .source
            .read(&path)
            .map_err(|source| EnvError::CantLoadFile {
                filename: filename.to_string_lossy().into_owned(),
                source,
            })?;

        // Decided before writing so a key repeated in the file keeps its last value
        let preset: HashSet<&str> = if self.override_existing {
            HashSet::new()
        } else {
            pairs
                .iter()
                .map(|(key, _)| key.as_str())
                .filter(|key| self.env.var(key).is_some())
                .collect()
        };

        let mut applied = 0usize;
        for (key, value) in &pairs {
            if preset.contains(key.as_str()) {
                continue;
            }
            self.env.set_var(key, value);
            applied += 1;
        }

        tracing::info!(
            path = %path.display(),
            total = pairs.len(),
            applied,
            "Loaded env file"
        );

        Ok(path)
    }

    /// Value of `key`, or [`EnvError::NoSuchVar`] if it is not set.
    pub fn get_env(&self, key: &str) -> Result<String, EnvError> {
        self.env.var(key).ok_or_else(|| EnvError::no_such_var(key))
    }
}
