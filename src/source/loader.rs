// File loading: path validation, reading and decoding.
//
// Everything that can go wrong with the filesystem is handled here, before
// text reaches the similarity engine. Rejected files are logged and skipped;
// whether enough files survive is the aggregator's call.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{Language, SourceInput};

/// Extensions accepted as source code (lowercase, without the dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["py", "js", "java", "cpp", "c", "cs", "php", "rb", "go"];

/// Validate and read a single file.
///
/// The path must exist, be a regular file, carry a supported extension and
/// contain valid UTF-8 that is not whitespace-only.
pub fn load_file(path: &Path) -> Result<SourceInput> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Not a regular file: {}", path.display());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        anyhow::bail!("Unsupported extension: {}", path.display());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))?;

    if text.trim().is_empty() {
        anyhow::bail!("Empty file: {}", path.display());
    }

    Ok(SourceInput {
        id: path.display().to_string(),
        text,
        language: Language::from_path(path),
    })
}

/// Load every path, skipping (and logging) the ones that fail validation.
///
/// Accepted files come back in argument order.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<SourceInput> {
    let mut accepted = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        match load_file(path) {
            Ok(input) => accepted.push(input),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping file");
            }
        }
    }

    info!(
        requested = paths.len(),
        accepted = accepted.len(),
        "Source files loaded"
    );

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "main.py", b"print('hi')\n");
        let input = load_file(&path).unwrap();
        assert_eq!(input.language, Language::Python);
        assert_eq!(input.text, "print('hi')\n");
        assert!(input.id.ends_with("main.py"));
    }

    #[test]
    fn test_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.py")).unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");
    }

    #[test]
    fn test_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("pkg.py");
        fs::create_dir(&sub).unwrap();
        assert!(load_file(&sub).is_err());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "notes.txt", b"hello");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported"), "{err}");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Main.JAVA", b"class Main {}");
        assert_eq!(load_file(&path).unwrap().language, Language::Java);
    }

    #[test]
    fn test_rejects_whitespace_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "blank.go", b"  \n\t\n");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Empty"), "{err}");
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bin.c", &[0xff, 0xfe, 0x00, 0x41]);
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn test_load_all_skips_bad_files_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.js", b"let a = 1;");
        let bad = dir.path().join("missing.js");
        let b = write_file(dir.path(), "b.rb", b"puts 1");
        let loaded = load_all(&[a, bad, b]);
        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].id.ends_with("a.js"));
        assert!(loaded[1].id.ends_with("b.rb"));
        assert_eq!(loaded[1].language, Language::Ruby);
    }
}
