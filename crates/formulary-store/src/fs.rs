//! Directory-backed implementation of `ResourceStore`.
//!
//! Each resource is one JSON file under a root directory. File names
//! default to the names the dashboard publishes and can be overridden per
//! resource.

use std::{
    collections::BTreeMap,
    future::Future,
    path::{Path, PathBuf},
};

use tracing::debug;

use formulary_contracts::{
    error::{FormularyError, FormularyResult},
    resource::{FetchedResource, ResourceKind},
};
use formulary_core::traits::ResourceStore;

use crate::fingerprint::fetched;

/// A `ResourceStore` reading `<root>/<file name>` with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    file_names: BTreeMap<ResourceKind, String>,
}

impl DirectoryStore {
    /// A store rooted at `root` using the default file names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let file_names = ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_file_name().to_string()))
            .collect();
        Self {
            root: root.into(),
            file_names,
        }
    }

    /// Override the file name read for `kind`.
    pub fn with_file_name(mut self, kind: ResourceKind, name: impl Into<String>) -> Self {
        self.file_names.insert(kind, name.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The full path read for `kind`.
    pub fn path_for(&self, kind: ResourceKind) -> PathBuf {
        let name = self
            .file_names
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_file_name());
        self.root.join(name)
    }
}

impl ResourceStore for DirectoryStore {
    fn fetch(
        &self,
        kind: ResourceKind,
    ) -> impl Future<Output = FormularyResult<FetchedResource>> + Send {
        let path = self.path_for(kind);
        async move {
            let body = tokio::fs::read(&path)
                .await
                .map_err(|e| FormularyError::ResourceUnavailable {
                    resource: kind,
                    reason: format!("failed to read '{}': {}", path.display(), e),
                })?;
            debug!(resource = %kind, path = %path.display(), bytes = body.len(), "resource file read");
            Ok(fetched(kind, body))
        }
    }
}
