//! Parsing of dotenv files into key/value pairs

use std::path::Path;

/// Reads a dotenv file into an ordered list of key/value pairs.
///
/// Implementations must not touch the environment; the
/// [`Loader`](crate::Loader) decides which pairs are applied.
pub trait DotenvSource {
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, dotenvy::Error>;
}

impl<F> DotenvSource for F
where
    F: Fn(&Path) -> Result<Vec<(String, String)>, dotenvy::Error>,
{
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, dotenvy::Error> {
        self(path)
    }
}

/// [`DotenvSource`] backed by the `dotenvy` parser.
///
/// The whole file is parsed before anything is returned, so a syntax error
/// on any line fails the read as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dotenvy;

impl DotenvSource for Dotenvy {
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, dotenvy::Error> {
        dotenvy::from_path_iter(path)?.collect()
    }
}
