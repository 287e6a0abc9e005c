//! Atomic document writes.

use std::path::{Path, PathBuf};

use tracing::debug;

use topicpress_shared::{RenderedDocument, Result, TopicPressError};

/// Create `dir` (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| TopicPressError::io(dir, e))
}

/// Write `doc` to `<dir>/<file_name>` via a temp file and rename, so a
/// crashed run never leaves a truncated document behind.
///
/// Returns the final path.
pub fn write_document(dir: &Path, doc: &RenderedDocument) -> Result<PathBuf> {
    let target = dir.join(&doc.file_name);
    let temp = dir.join(format!(".{}.tmp", doc.file_name));

    if let Err(e) = std::fs::write(&temp, &doc.content) {
        let _ = std::fs::remove_file(&temp);
        return Err(TopicPressError::io(&temp, e));
    }

    if let Err(e) = std::fs::rename(&temp, &target) {
        let _ = std::fs::remove_file(&temp);
        return Err(TopicPressError::io(&target, e));
    }

    debug!(path = %target.display(), bytes = doc.content.len(), "wrote document");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tp-writer-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn doc(name: &str, content: &str) -> RenderedDocument {
        RenderedDocument {
            output_id: name.into(),
            file_name: format!("{name}.qmd"),
            content: content.into(),
        }
    }

    #[test]
    fn writes_and_leaves_no_temp_file() {
        let dir = temp_dir();
        let path = write_document(&dir, &doc("farsite", "# FARSITE\n")).unwrap();

        assert_eq!(path, dir.join("farsite.qmd"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# FARSITE\n");
        assert!(!dir.join(".farsite.qmd.tmp").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn overwrites_existing_document() {
        let dir = temp_dir();
        write_document(&dir, &doc("a", "old")).unwrap();
        write_document(&dir, &doc("a", "new")).unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("a.qmd")).unwrap(), "new");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rename_onto_directory_fails_cleanly() {
        let dir = temp_dir();
        std::fs::create_dir_all(dir.join("blocked.qmd")).unwrap();

        let err = write_document(&dir, &doc("blocked", "text")).unwrap_err();
        assert!(matches!(err, TopicPressError::Io { .. }));
        assert!(!dir.join(".blocked.qmd.tmp").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_temp_write_removes_partial_file() {
        // Writes through /dev/full fail with ENOSPC, like a full disk.
        let dir = temp_dir();
        let temp = dir.join(".full.qmd.tmp");
        std::os::unix::fs::symlink("/dev/full", &temp).unwrap();

        let err = write_document(&dir, &doc("full", "text")).unwrap_err();
        assert!(matches!(err, TopicPressError::Io { .. }));
        assert!(std::fs::symlink_metadata(&temp).is_err());
        assert!(!dir.join("full.qmd").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn ensure_output_dir_creates_nested() {
        let dir = temp_dir().join("a/b/c");
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
