//! Loading script source from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Read the whole script at `path`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; they can
/// only ever appear inside string literals of a well-formed script.
pub fn load(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    info!(path = %path.display(), size = bytes.len(), "source loaded");

    match String::from_utf8(bytes) {
        Ok(src) => Ok(src),
        Err(e) => {
            warn!(path = %path.display(), "source is not valid UTF-8, replacing bad bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("definitely/not/here.ppp")).unwrap_err();
        assert!(format!("{err}").contains("Reading definitely/not/here.ppp"));
    }

    #[test]
    fn test_load_fixture() {
        let src = load(Path::new("tests/programs/hello.ppp")).unwrap();
        assert!(src.contains("write"));
    }
}
