// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Category reference data.
//!
//! The allowed category lists come from the remote once and are cached in
//! `.spendwise/categories.json`. Later runs read the cache; `--refresh`
//! refetches. With neither a cache nor a reachable remote the built-in
//! defaults are used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sw_core::CategorySet;
use tracing::{debug, warn};

use crate::error::Result;
use crate::sync::{RemoteSubmitter, SubmitFuture, Transport};

/// Where a category set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryOrigin {
    Cache,
    Remote,
    Builtin,
}

impl CategoryOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryOrigin::Cache => "cache",
            CategoryOrigin::Remote => "remote",
            CategoryOrigin::Builtin => "builtin",
        }
    }

    /// True if the set reflects what the remote actually allows.
    pub fn is_authoritative(&self) -> bool {
        !matches!(self, CategoryOrigin::Builtin)
    }
}

/// Something that can supply the allowed category lists.
pub trait CategorySource: Send + Sync {
    fn fetch(&self) -> SubmitFuture<'_, CategorySet>;
}

impl<T: Transport> CategorySource for RemoteSubmitter<T> {
    fn fetch(&self) -> SubmitFuture<'_, CategorySet> {
        Box::pin(self.fetch_categories())
    }
}

/// JSON cache of the remote's category lists.
pub struct CategoryCache {
    path: PathBuf,
}

impl CategoryCache {
    pub fn new(path: &Path) -> Self {
        CategoryCache {
            path: path.to_path_buf(),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache. A missing or unreadable cache yields `None`.
    pub fn load(&self) -> Option<CategorySet> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("cannot read category cache: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<CategorySet>(&content) {
            Ok(set) if !set.is_empty() => Some(set.normalized()),
            Ok(_) => None,
            Err(e) => {
                warn!("ignoring corrupted category cache: {}", e);
                None
            }
        }
    }

    /// Replace the cache contents.
    pub fn store(&self, categories: &CategorySet) -> Result<()> {
        let content = serde_json::to_string_pretty(categories)?;
        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Resolve the category set to use.
    ///
    /// Order: cache (unless `refresh`), then `source`, then whatever cache
    /// exists, then the built-in defaults.
    pub async fn resolve<S: CategorySource + ?Sized>(
        &self,
        source: Option<&S>,
        refresh: bool,
    ) -> Result<(CategorySet, CategoryOrigin)> {
        if !refresh {
            if let Some(cached) = self.load() {
                return Ok((cached, CategoryOrigin::Cache));
            }
        }

        if let Some(source) = source {
            match source.fetch().await {
                Ok(fetched) if !fetched.is_empty() => {
                    match self.store(&fetched) {
                        Ok(()) => debug!("cached categories from remote"),
                        Err(e) => warn!("cannot cache categories: {}", e),
                    }
                    return Ok((fetched, CategoryOrigin::Remote));
                }
                Ok(_) => warn!("remote returned no categories"),
                Err(e) => warn!("cannot fetch categories: {}", e),
            }
        }

        if refresh {
            if let Some(cached) = self.load() {
                return Ok((cached, CategoryOrigin::Cache));
            }
        }
        Ok((CategorySet::builtin(), CategoryOrigin::Builtin))
    }
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
