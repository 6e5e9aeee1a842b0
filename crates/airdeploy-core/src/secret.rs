use crate::error::Result;
use crate::io;
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::Path;

pub const DEFAULT_SECRET_KEY: &str = "JWT_SECRET";
const SECRET_BYTES: usize = 32;

/// 32 bytes from the OS CSPRNG, lowercase hex.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Write a fresh `KEY=<secret>` file, replacing whatever was there.
pub fn write_secret(path: &Path, key: &str) -> Result<()> {
    let content = format!("{key}={}\n", generate_secret());
    io::atomic_write(path, content.as_bytes())?;
    tracing::info!(path = %path.display(), key, "wrote secret file");
    Ok(())
}
