// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Author identity and project root lookup
//!
//! The configured author name is read through an [`IdentityProvider`] so the
//! rest of the pipeline can be exercised without a real git configuration.

use std::path::{Path, PathBuf};

use git2::{Config, Repository};
use tracing::debug;

use crate::error::GitError;

/// Source of the default author name
pub trait IdentityProvider {
    /// The configured author name, or `None` when nothing is configured
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the configuration cannot be read.
    fn user_name(&self) -> Result<Option<String>, GitError>;
}

/// Reads `user.name` from the git configuration
///
/// Repository-local configuration takes precedence over global and system
/// configuration when a repository is found at `path`.
#[derive(Debug, Clone, Default)]
pub struct GitConfigIdentity {
    path: Option<PathBuf>,
}

impl GitConfigIdentity {
    /// Look up the identity using only global and system configuration
    #[must_use]
    pub fn global() -> Self {
        Self { path: None }
    }

    /// Look up the identity as seen from inside the repository at `path`
    #[must_use]
    pub fn for_repo(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn open_config(&self) -> Result<Config, GitError> {
        if let Some(ref path) = self.path {
            if let Ok(repo) = Repository::discover(path) {
                return Ok(repo.config()?);
            }
        }
        Ok(Config::open_default()?)
    }
}

impl IdentityProvider for GitConfigIdentity {
    fn user_name(&self) -> Result<Option<String>, GitError> {
        let config = self.open_config()?;
        match config.get_string("user.name") {
            Ok(name) => Ok(non_blank(&name)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// A fixed identity, or none at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedIdentity(pub Option<String>);

impl FixedIdentity {
    /// An identity that always resolves to `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    /// An identity that never resolves
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl IdentityProvider for FixedIdentity {
    fn user_name(&self) -> Result<Option<String>, GitError> {
        Ok(self.0.as_deref().and_then(non_blank))
    }
}

/// Pick the author for a query
///
/// A non-blank `explicit` name wins; otherwise the provider is consulted.
///
/// # Errors
///
/// Returns `GitError::MissingAuthor` if neither yields a name.
pub fn resolve_author(
    explicit: Option<&str>,
    provider: &dyn IdentityProvider,
) -> Result<String, GitError> {
    if let Some(name) = explicit.and_then(non_blank) {
        return Ok(name);
    }
    let name = provider.user_name()?.ok_or(GitError::MissingAuthor)?;
    debug!(author = %name, "Using configured git identity");
    Ok(name)
}

/// Find the working-tree root of the repository containing `start`
///
/// # Errors
///
/// Returns `GitError::RepositoryNotFound` if `start` is not inside a
/// repository, or `GitError::BareRepository` if it has no working tree.
pub fn project_root(start: impl AsRef<Path>) -> Result<PathBuf, GitError> {
    let start = start.as_ref();
    let repo = Repository::discover(start).map_err(|_| GitError::RepositoryNotFound {
        path: start.display().to_string(),
    })?;
    let workdir = repo.workdir().ok_or_else(|| GitError::BareRepository {
        path: repo.path().display().to_string(),
    })?;
    Ok(workdir.to_path_buf())
}

fn non_blank(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::env;

    #[test]
    fn test_explicit_author_wins() {
        let provider = FixedIdentity::new("configured");
        let author = resolve_author(Some("explicit"), &provider).expect("resolve");
        assert_eq!(author, "explicit");
    }

    #[test]
    fn test_blank_explicit_author_falls_back() {
        let provider = FixedIdentity::new("configured");
        let author = resolve_author(Some("   "), &provider).expect("resolve");
        assert_eq!(author, "configured");
    }

    #[test]
    fn test_missing_author_fails_fast() {
        let result = resolve_author(None, &FixedIdentity::none());
        assert!(matches!(result, Err(GitError::MissingAuthor)));
    }

    #[test]
    fn test_blank_configured_author_is_missing() {
        let result = resolve_author(None, &FixedIdentity::new(" "));
        assert!(matches!(result, Err(GitError::MissingAuthor)));
    }

    #[test]
    fn test_fixed_identity_trims() {
        let provider = FixedIdentity::new("  alice  ");
        assert_eq!(provider.user_name().expect("name"), Some("alice".to_string()));
    }

    #[test]
    fn test_project_root_of_this_crate() {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
        // The crate may be built outside a checkout
        if let Ok(root) = project_root(&manifest_dir) {
            assert!(root.is_dir());
        }
    }

    #[test]
    fn test_project_root_nonexistent_path() {
        let result = project_root("/nonexistent/path/12345");
        match result {
            Err(GitError::RepositoryNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected RepositoryNotFound error, got {other:?}"),
        }
    }
}
