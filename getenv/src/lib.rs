//! Bootstrap environment variables from the nearest `.env.local`
//!
//! `getenv` looks for an environment file in the current working directory
//! and, failing that, in each parent directory up to the filesystem root.
//! The first file found is parsed with [`dotenvy`] and its variables are
//! added to the process environment. Variables are then read back with
//! [`get_env`], which reports absence as an error instead of an empty string.
//!
//! # Features
//!
//! - **Upward search**: a project-wide `.env.local` is found from any subdirectory
//! - **Typed errors**: every failure is an [`EnvError`] with a stable [`ErrorCode`]
//! - **Non-destructive**: variables already set in the environment win by default
//! - **Injectable**: [`Loader`] accepts any [`Environment`] and [`DotenvSource`]
//!
//! # Example
//!
//! ```rust,no_run
//! fn main() -> anyhow::Result<()> {
//!     getenv::init()?;
//!     let database_url = getenv::get_env("DATABASE_URL")?;
//!     println!("{database_url}");
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! | Code | Variant | Cause |
//! |---|---|---|
//! | 1 | [`EnvError::CwdFailure`] | working directory cannot be determined |
//! | 2 | [`EnvError::CantAccessFile`] | a candidate path cannot be checked |
//! | 3 | [`EnvError::NoEnvFile`] | no ancestor holds the file |
//! | 4 | [`EnvError::CantLoadFile`] | the file was found but could not be parsed or read |
//! | 5 | [`EnvError::NoSuchVar`] | the requested variable is not set |
//!
//! ```rust
//! use getenv::{ErrorCode, Loader, MemoryEnv};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let loader = Loader::new().with_env(MemoryEnv::new()).start_dir(dir.path());
//!
//! let err = loader.init_from_file("non-existing-file").unwrap_err();
//! assert_eq!(err.code(), ErrorCode::NoEnvFile);
//! ```

mod env;
mod error;
mod loader;
mod resolve;
mod source;

pub use env::{Environment, MemoryEnv, ProcessEnv};
pub use error::{EnvError, ErrorCode};
pub use loader::{get_env, init, init_from_file, Loader, DEFAULT_ENV_FILE};
pub use resolve::{resolve_env_file_path, resolve_env_file_path_from};
pub use source::{DotenvSource, Dotenvy};
