use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a file as text, replacing invalid UTF-8 instead of failing.
/// Returns `None` when the file cannot be opened or read.
pub fn read_source_lossy(file_path: &Path) -> Option<String> {
    match read_bytes(file_path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            log::warn!("Failed to read {}: {}", file_path.display(), err);
            None
        }
    }
}

fn read_bytes(file_path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(file_path)?;
    let file_size = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut content = Vec::with_capacity(file_size);
    reader.read_to_end(&mut content)?;
    Ok(content)
}
