//! Template discovery: expands the configured glob into [`TemplateArtifact`]s.

use std::path::{Path, PathBuf};

use pagewright_core::ResolvedConfig;

use crate::error::BuildError;

/// A discovered template source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateArtifact {
    pub path: PathBuf,
    /// File name without the template extension; names the data and output files.
    pub base_name: String,
}

impl TemplateArtifact {
    pub fn new(path: PathBuf, extension: &str) -> Self {
        let base_name = base_name(&path, extension);
        TemplateArtifact { path, base_name }
    }
}

/// File name of `path` with a trailing `.<extension>` removed.
///
/// A file without that suffix keeps its whole file name.
pub fn base_name(path: &Path, extension: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(&format!(".{extension}")) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}

/// Every regular file matching the configured pattern, in glob order.
///
/// Entries the glob cannot read are logged and skipped.
pub fn discover(config: &ResolvedConfig) -> Result<Vec<TemplateArtifact>, BuildError> {
    let paths = glob::glob(&config.pattern).map_err(|e| BuildError::Pattern {
        pattern: config.pattern.clone(),
        source: e,
    })?;

    let mut found = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => found.push(TemplateArtifact::new(path, &config.extension)),
            Ok(path) => tracing::debug!("skipping non-file match {}", path.display()),
            Err(e) => tracing::warn!("skipping unreadable match {}: {}", e.path().display(), e),
        }
    }
    tracing::debug!("discovered {} templates with {}", found.len(), config.pattern);
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_core::Config;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path, pattern: &str) -> ResolvedConfig {
        Config::from_yaml_str(&format!(
            "baseDir: {}\nsource: src\npattern: \"{pattern}\"\ndest: build\ndata: data\nglobal: data/global.json\n",
            root.display()
        ))
        .unwrap()
        .resolve()
        .unwrap()
    }

    #[test]
    fn base_name_strips_template_extension_only() {
        assert_eq!(base_name(Path::new("/a/index.twig"), "twig"), "index");
        assert_eq!(base_name(Path::new("/a/page.html.twig"), "twig"), "page.html");
        assert_eq!(base_name(Path::new("/a/notes.txt"), "twig"), "notes.txt");
        assert_eq!(base_name(Path::new("/a/.twig"), "twig"), ".twig");
    }

    #[test]
    fn every_match_is_found_once_in_order() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("src");
        fs::create_dir_all(&src).unwrap();
        for name in ["b.twig", "a.twig", "c.twig", "ignored.txt"] {
            fs::write(src.join(name), "x").unwrap();
        }

        let found = discover(&config_for(root.path(), "src/*.twig")).unwrap();
        let names: Vec<_> = found.iter().map(|a| a.base_name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn directories_matching_the_pattern_are_skipped() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("src");
        fs::create_dir_all(src.join("folder.twig")).unwrap();
        fs::write(src.join("page.twig"), "x").unwrap();

        let found = discover(&config_for(root.path(), "src/*.twig")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].base_name, "page");
    }

    #[test]
    fn no_matches_is_an_empty_set() {
        let root = TempDir::new().unwrap();
        let found = discover(&config_for(root.path(), "src/*.twig")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let root = TempDir::new().unwrap();
        let err = discover(&config_for(root.path(), "src/[*.twig")).unwrap_err();
        assert!(matches!(err, BuildError::Pattern { .. }), "got: {err}");
    }
}
