//! Filesystem template loader with named virtual roots ("namespaces").
//!
//! | Template name            | Resolves to                         |
//! |--------------------------|-------------------------------------|
//! | `templates/index.twig`   | `<base>/templates/index.twig`       |
//! | `@components/card.twig`  | `<dir registered for components>/card.twig` |
//!
//! Names are always resolved against a root, never against the including
//! template's location. `..` segments are refused.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use minijinja::{Error, ErrorKind};

use crate::error::RenderError;

/// Resolves template names to files under the base directory or a namespace.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    base_dir: PathBuf,
    namespaces: BTreeMap<String, PathBuf>,
}

impl TemplateLoader {
    /// Create a loader rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let base_dir = base_dir.into();
        if !base_dir.is_dir() {
            return Err(RenderError::MissingRoot { path: base_dir });
        }
        Ok(Self {
            base_dir,
            namespaces: BTreeMap::new(),
        })
    }

    /// Register `dir` as the root for `@name/...` template names.
    ///
    /// Registering the same name twice replaces the earlier directory.
    pub fn add_namespace(
        &mut self,
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
    ) -> Result<(), RenderError> {
        let name = name.into();
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(RenderError::MissingNamespace { name, path: dir });
        }
        tracing::debug!("namespace @{} -> {}", name, dir.display());
        self.namespaces.insert(name, dir);
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn namespaces(&self) -> &BTreeMap<String, PathBuf> {
        &self.namespaces
    }

    /// Filesystem path for a template name, if the name is well formed and
    /// its namespace (if any) is registered. Does not check existence.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.lookup(name).ok()
    }

    fn lookup(&self, name: &str) -> Result<PathBuf, String> {
        let (root, rest) = match name.strip_prefix('@') {
            Some(namespaced) => {
                let (ns, rest) = namespaced
                    .split_once('/')
                    .ok_or_else(|| format!("malformed namespaced template name \"{name}\""))?;
                let root = self
                    .namespaces
                    .get(ns)
                    .ok_or_else(|| format!("no directory registered for namespace \"@{ns}\""))?;
                (root, rest)
            }
            None => (&self.base_dir, name),
        };

        let mut path = root.clone();
        for segment in rest.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return Err(format!("template name \"{name}\" leaves its root")),
                part => path.push(part),
            }
        }
        Ok(path)
    }

    /// Loader callback for the engine: `Ok(None)` when no such file exists.
    pub fn load(&self, name: &str) -> Result<Option<String>, Error> {
        let path = self
            .lookup(name)
            .map_err(|reason| Error::new(ErrorKind::TemplateNotFound, reason))?;
        if !path.is_file() {
            return Ok(None);
        }
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                tracing::debug!("loaded template {} from {}", name, path.display());
                Ok(Some(source))
            }
            Err(e) => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template file {}", path.display()),
            )
            .with_source(e)),
        }
    }

    /// Raw source text of a template, for diagnostics.
    pub fn source(&self, name: &str) -> Option<String> {
        self.load(name).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader_with_ns(root: &TempDir) -> TemplateLoader {
        let components = root.path().join("components");
        fs::create_dir_all(&components).unwrap();
        let mut loader = TemplateLoader::new(root.path()).unwrap();
        loader.add_namespace("components", &components).unwrap();
        loader
    }

    #[test]
    fn plain_names_resolve_against_base_dir() {
        let root = TempDir::new().unwrap();
        let loader = loader_with_ns(&root);
        assert_eq!(
            loader.resolve("templates/index.twig"),
            Some(root.path().join("templates").join("index.twig"))
        );
    }

    #[test]
    fn namespaced_names_resolve_against_namespace_dir() {
        let root = TempDir::new().unwrap();
        let loader = loader_with_ns(&root);
        assert_eq!(
            loader.resolve("@components/cards/card.twig"),
            Some(root.path().join("components").join("cards").join("card.twig"))
        );
    }

    #[test]
    fn unknown_namespace_is_a_lookup_error() {
        let root = TempDir::new().unwrap();
        let loader = loader_with_ns(&root);
        assert_eq!(loader.resolve("@nope/card.twig"), None);
        let err = loader.load("@nope/card.twig").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
        assert!(err.to_string().contains("@nope"), "got: {err}");
    }

    #[test]
    fn parent_segments_are_refused() {
        let root = TempDir::new().unwrap();
        let loader = loader_with_ns(&root);
        assert_eq!(loader.resolve("../secret.twig"), None);
        assert_eq!(loader.resolve("@components/../../secret.twig"), None);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let root = TempDir::new().unwrap();
        let loader = loader_with_ns(&root);
        assert!(loader.load("templates/absent.twig").unwrap().is_none());
    }

    #[test]
    fn existing_file_loads_its_source() {
        let root = TempDir::new().unwrap();
        let loader = loader_with_ns(&root);
        fs::write(root.path().join("components").join("card.twig"), "card").unwrap();
        assert_eq!(loader.source("@components/card.twig").as_deref(), Some("card"));
    }

    #[test]
    fn missing_namespace_dir_is_rejected() {
        let root = TempDir::new().unwrap();
        let mut loader = TemplateLoader::new(root.path()).unwrap();
        let err = loader
            .add_namespace("ghost", root.path().join("ghost"))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingNamespace { .. }), "got: {err}");
    }

    #[test]
    fn missing_root_is_rejected() {
        let root = TempDir::new().unwrap();
        let err = TemplateLoader::new(root.path().join("absent")).unwrap_err();
        assert!(matches!(err, RenderError::MissingRoot { .. }), "got: {err}");
    }
}
