//! Loading into an in-memory environment

use getenv::{Environment, Loader, MemoryEnv};
use std::fs;

fn main() -> anyhow::Result<()> {
    let project = tempfile::tempdir()?;
    fs::write(
        project.path().join(".env.local"),
        "DATABASE_URL=postgres://localhost/mydb\nSERVER_ADDR=0.0.0.0:3000\n",
    )?;
    let workdir = project.path().join("crates").join("api");
    fs::create_dir_all(&workdir)?;

    // Values already present are kept unless override_existing(true) is set
    let env: MemoryEnv = [("SERVER_ADDR", "127.0.0.1:8080")].into_iter().collect();
    let loader = Loader::new().with_env(env).start_dir(&workdir);

    let path = loader.init()?;
    println!("Loaded {}", path.display());
    println!("  Database URL: {}", loader.get_env("DATABASE_URL")?);
    println!("  Server Address: {}", loader.get_env("SERVER_ADDR")?);
    println!("  Process sees DATABASE_URL: {:?}", std::env::var("DATABASE_URL").ok());
    println!("  Variables held: {}", loader.env().vars().len());
    assert!(loader.env().var("DATABASE_URL").is_some());

    Ok(())
}
