//! Upward search for an environment file

use crate::error::EnvError;
use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Find `filename` in the working directory or the nearest ancestor holding it.
///
/// # Errors
///
/// - [`EnvError::CwdFailure`] if the working directory cannot be determined
/// - [`EnvError::CantAccessFile`] if a candidate cannot be checked
/// - [`EnvError::NoEnvFile`] if no ancestor up to the root holds the file
pub fn resolve_env_file_path(filename: impl AsRef<Path>) -> Result<PathBuf, EnvError> {
    let cwd = env::current_dir().map_err(|source| EnvError::CwdFailure { source })?;
    resolve_env_file_path_from(cwd, filename)
}

/// Find `filename` in `start_dir` or the nearest ancestor holding it.
///
/// The search includes `start_dir` itself and ascends one directory at a
/// time. Any error other than "not found" stops the search.
///
/// A relative `start_dir` is taken relative to the working directory, and
/// `.`/`..` segments are folded lexically before the search starts, so each
/// candidate is strictly higher in the tree than the one before.
pub fn resolve_env_file_path_from(
    start_dir: impl Into<PathBuf>,
    filename: impl AsRef<Path>,
) -> Result<PathBuf, EnvError> {
    search_upward(start_dir.into(), filename.as_ref(), |path| {
        fs::metadata(path).map(drop)
    })
}

fn search_upward<F>(start_dir: PathBuf, filename: &Path, exists: F) -> Result<PathBuf, EnvError>
where
    F: Fn(&Path) -> io::Result<()>,
{
    if filename.as_os_str().is_empty() {
        return Err(EnvError::no_env_file(""));
    }

    let mut dir = if start_dir.is_absolute() {
        normalize(&start_dir)
    } else {
        let cwd = env::current_dir().map_err(|source| EnvError::CwdFailure { source })?;
        normalize(&cwd.join(start_dir))
    };

    loop {
        let candidate = dir.join(filename);
        tracing::debug!(path = %candidate.display(), "Checking for env file");

        match exists(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(EnvError::CantAccessFile {
                    path: candidate,
                    source,
                });
            }
        }

        if !dir.pop() {
            return Err(EnvError::no_env_file(filename.to_string_lossy()));
        }
    }
}

/// Drop `.` segments and fold `..` into its parent without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serial_test::serial;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        let deep = root.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        (root, deep)
    }

    #[test]
    fn test_found_in_start_dir() {
        let (_root, deep) = tree();
        fs::write(deep.join(".env.local"), "A=1\n").unwrap();

        let path = resolve_env_file_path_from(&deep, ".env.local").unwrap();
        assert_eq!(path, deep.join(".env.local"));
    }

    #[test]
    fn test_found_in_ancestor() {
        let (root, deep) = tree();
        let a = root.path().join("a");
        fs::write(a.join(".env.local"), "A=1\n").unwrap();

        let path = resolve_env_file_path_from(&deep, ".env.local").unwrap();
        assert_eq!(path, a.join(".env.local"));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let (root, deep) = tree();
        let a = root.path().join("a");
        let b = a.join("b");
        fs::write(a.join(".env.local"), "LEVEL=a\n").unwrap();
        fs::write(b.join(".env.local"), "LEVEL=b\n").unwrap();

        let path = resolve_env_file_path_from(&deep, ".env.local").unwrap();
        assert_eq!(path, b.join(".env.local"));
    }

    #[test]
    fn test_missing_everywhere() {
        let (_root, deep) = tree();
        let err =
            resolve_env_file_path_from(&deep, "getenv-test-no-such-file-3f9a1c").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoEnvFile);
        match err {
            EnvError::NoEnvFile { filename } => {
                assert_eq!(filename, "getenv-test-no-such-file-3f9a1c")
            }
            other => panic!("Expected NoEnvFile, got {other:?}"),
        }
    }

    #[test]
    fn test_starting_at_root_terminates() {
        let err =
            resolve_env_file_path_from("/", "getenv-test-no-such-file-3f9a1c").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoEnvFile);
    }

    #[test]
    fn test_empty_filename() {
        let (_root, deep) = tree();
        let err = resolve_env_file_path_from(&deep, "").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoEnvFile);
    }

    #[test]
    fn test_nested_relative_filename() {
        let (root, deep) = tree();
        let config = root.path().join("a").join("config");
        fs::create_dir_all(&config).unwrap();
        fs::write(config.join(".env"), "A=1\n").unwrap();

        let path = resolve_env_file_path_from(&deep, "config/.env").unwrap();
        assert_eq!(path, config.join(".env"));
    }

    #[test]
    fn test_directory_with_matching_name_counts() {
        let (root, deep) = tree();
        fs::create_dir_all(root.path().join("a").join(".env.local")).unwrap();

        let path = resolve_env_file_path_from(&deep, ".env.local").unwrap();
        assert_eq!(path, root.path().join("a").join(".env.local"));
    }

    #[test]
    fn test_access_error_stops_search() {
        let (root, deep) = tree();
        fs::write(root.path().join(".env.local"), "A=1\n").unwrap();
        let blocked = deep.join(".env.local");

        let result = search_upward(deep.clone(), Path::new(".env.local"), |path| {
            if path == blocked {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                fs::metadata(path).map(drop)
            }
        });

        match result {
            Err(EnvError::CantAccessFile { path, source }) => {
                assert_eq!(path, blocked);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("Expected CantAccessFile, got {other:?}"),
        }
    }

    #[test]
    fn test_candidates_ascend_strictly() {
        let (root, deep) = tree();
        let seen = RefCell::new(Vec::new());

        let err = search_upward(deep.join("..").join("c"), Path::new(".env.none"), |path| {
            seen.borrow_mut().push(path.to_path_buf());
            Err(io::Error::from(io::ErrorKind::NotFound))
        })
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoEnvFile);

        let seen = seen.into_inner();
        assert_eq!(seen[0], deep.join(".env.none"));
        assert_eq!(seen[1], root.path().join("a").join("b").join(".env.none"));
        assert!(seen
            .windows(2)
            .all(|pair| pair[1].components().count() < pair[0].components().count()));
    }

    #[test]
    fn test_parent_segment_in_start_dir() {
        let (root, deep) = tree();
        let a = root.path().join("a");
        fs::write(deep.join(".env.local"), "LEVEL=c\n").unwrap();
        fs::write(a.join(".env.local"), "LEVEL=a\n").unwrap();

        // a/b/c/.. is a/b, so the file inside c must not be found
        let path = resolve_env_file_path_from(deep.join(".."), ".env.local").unwrap();
        assert_eq!(path, a.join(".env.local"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let (root, deep) = tree();
        let b = root.path().join("a").join("b");
        fs::set_permissions(&b, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass permission checks
        let check = fs::metadata(b.join("c").join("anything"));
        let denied = matches!(&check, Err(e) if e.kind() == io::ErrorKind::PermissionDenied);

        let result = resolve_env_file_path_from(&deep, ".env.local");
        fs::set_permissions(&b, fs::Permissions::from_mode(0o755)).unwrap();

        if !denied {
            eprintln!(
                "test_unreadable_directory: permissions not enforced for this user, \
                 real-filesystem check skipped (see test_access_error_stops_search)"
            );
            return;
        }
        match result {
            Err(EnvError::CantAccessFile { path, .. }) => {
                assert_eq!(path, deep.join(".env.local"))
            }
            other => panic!("Expected CantAccessFile, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_relative_start_dir_uses_cwd() {
        let (root, _deep) = tree();
        fs::write(root.path().join(".env.rel"), "A=1\n").unwrap();

        let original = env::current_dir().unwrap();
        env::set_current_dir(root.path().join("a")).unwrap();
        let result = resolve_env_file_path_from("b/c", ".env.rel");
        env::set_current_dir(original).unwrap();

        // Ascends past the working directory rather than stopping at ""
        let path = result.unwrap();
        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), ".env.rel");
        assert!(path.exists());
    }

    #[test]
    #[serial]
    fn test_resolve_from_cwd() {
        let (_root, deep) = tree();
        fs::write(deep.join(".env.cwd"), "A=1\n").unwrap();

        let original = env::current_dir().unwrap();
        env::set_current_dir(&deep).unwrap();
        let result = resolve_env_file_path(".env.cwd");
        env::set_current_dir(original).unwrap();

        // current_dir may canonicalize the temp path
        let path = result.unwrap();
        assert_eq!(path.file_name().unwrap(), ".env.cwd");
        assert!(path.exists());
    }
}
