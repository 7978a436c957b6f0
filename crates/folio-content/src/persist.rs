//! Writing the project list back to disk.

use std::path::Path;

use folio_types::error::{FolioError, Result};
use serde::Serialize;

/// Serialize `value` as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| FolioError::Persistence(format!("non-UTF-8 JSON: {e}")))
}

/// Write `value` to `path` as four-space-indented JSON, creating parent
/// directories as needed.
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = to_pretty_json(value)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| FolioError::Persistence(format!("{}: {e}", parent.display())))?;
    }
    std::fs::write(path, text)
        .map_err(|e| FolioError::Persistence(format!("{}: {e}", path.display())))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_space_indent() {
        let json = to_pretty_json(&serde_json::json!([{"id": "a"}])).unwrap();
        assert_eq!(json, "[\n    {\n        \"id\": \"a\"\n    }\n]");
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("projects.json");
        write_pretty_json(&path, &serde_json::json!([])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = write_pretty_json(&blocker.join("out.json"), &serde_json::json!([])).unwrap_err();
        assert!(matches!(err, FolioError::Persistence(_)));
    }
}
