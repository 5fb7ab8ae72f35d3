use crate::domain::language::Dialect;
use crate::domain::source::SourceFile;
use crate::error::{LexgraphError, Result};
use std::fs;
use std::path::Path;

/// Reads source files from disk and tags each with its dialect.
///
/// Bytes are decoded lossily: legacy sources often carry comments in a
/// non-UTF-8 code page, and offsets only need to be stable, not faithful.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceLoader {
    dialect: Option<Dialect>,
}

impl SourceLoader {
    /// `dialect` forces every file to that dialect instead of inferring it
    /// from the extension.
    pub fn new(dialect: Option<Dialect>) -> Self {
        Self { dialect }
    }

    pub fn load_file(&self, path: &Path) -> Result<SourceFile> {
        let dialect = match self.dialect.or_else(|| Dialect::from_path(path)) {
            Some(dialect) => dialect,
            None => {
                return Err(LexgraphError::UnknownDialect(path.display().to_string()));
            }
        };
        let bytes = fs::read(path).map_err(|e| LexgraphError::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(SourceFile::new(path, dialect, text))
    }

    /// Load every recognised source file below `dir`, sorted by path.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        self.collect_recursive(dir, &mut files)?;

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup_by(|a, b| a.path == b.path);
        tracing::debug!(dir = %dir.display(), files = files.len(), "sources collected");
        Ok(files)
    }

    fn collect_recursive(&self, dir: &Path, out: &mut Vec<SourceFile>) -> Result<()> {
        if dir.ends_with("target") || dir.ends_with(".git") {
            return Ok(());
        }

        let entries = fs::read_dir(dir).map_err(|e| LexgraphError::io(dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| LexgraphError::io(dir, e))?.path();
            if path.is_dir() {
                self.collect_recursive(&path, out)?;
            } else if Dialect::from_path(&path).is_some() {
                out.push(self.load_file(&path)?);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_dir_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.c"), "int b(void) { return 0; }").unwrap();
        fs::write(dir.path().join("a.cbl"), "A-PARA.\n    EXIT.\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("target").join("gen.c"), "int gen(void) { }").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.h"), "void c(void);").unwrap();

        let files = SourceLoader::default().load_dir(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.cbl", "b.c", "sub/c.h"]);
        assert_eq!(files[0].dialect, Dialect::Cobol);
        assert_eq!(files[1].dialect, Dialect::CLike);
    }

    #[test]
    fn test_override_dialect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.txt");
        fs::write(&path, "MAIN.\n").unwrap();
        assert!(matches!(
            SourceLoader::default().load_file(&path),
            Err(LexgraphError::UnknownDialect(_))
        ));
        let file = SourceLoader::new(Some(Dialect::Cobol)).load_file(&path).unwrap();
        assert_eq!(file.dialect, Dialect::Cobol);
    }

    #[test]
    fn test_non_utf8_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.c");
        let mut bytes = b"/* \xc7\xd1\xb1\xdb */\nint f(void) { g(); }".to_vec();
        bytes.push(b'\n');
        fs::write(&path, &bytes).unwrap();
        let file = SourceLoader::default().load_file(&path).unwrap();
        assert!(file.text.contains("int f(void)"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SourceLoader::default().load_file(Path::new("/nonexistent/x.c")).unwrap_err();
        assert!(matches!(err, LexgraphError::Io { .. }));
    }
}
