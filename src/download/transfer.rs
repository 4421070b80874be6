use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename suggested for a download: the final segment of the source path.
pub fn suggested_filename(src: &Path) -> Option<String> {
    src.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Copy `src` into `dest_dir`, creating the directory if needed.
///
/// Returns the destination path on success. The session reset is timer-based
/// rather than completion-based, so callers may drop the result.
pub fn download_to(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let name = suggested_filename(src)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source has no filename"))?;

    fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(name);
    fs::copy(src, &dest)?;
    Ok(dest)
}
