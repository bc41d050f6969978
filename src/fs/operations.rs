use std::path::Path;

use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncWriteExt},
};

/// Reads the whole file while holding a shared lock on it.
pub async fn read_locked(path: &Path) -> Result<String, io::Error> {
    let mut file = File::open(path).await?;
    file.lock_shared()?;
    let mut contents = String::new();
    let result = file.read_to_string(&mut contents).await;
    file.unlock_async().await?;
    result.map(|_| contents)
}

/// Replaces the contents of the file with `data` while holding an exclusive lock on it.
/// There is no rename step, so a crash in the middle of a write leaves a truncated file behind.
pub async fn overwrite_locked(path: &Path, data: &[u8]) -> Result<(), io::Error> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await?;
    // Unlock even when the write fails, then report the write error.
    file.lock_exclusive()?;
    let result = overwrite_with_file(&mut file, data).await;
    file.unlock_async().await?;
    result
}

async fn overwrite_with_file(file: &mut File, data: &[u8]) -> Result<(), io::Error> {
    // Truncating only after the lock is held keeps a reader from seeing an empty file.
    file.set_len(0).await?;
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_data().await
}
