//! Asset version resolution.
//!
//! # Responsibilities
//! - Hold the current asset version: unset, pinned, or computed on demand
//! - Derive a pinned version from the build manifest (md5 of its bytes)
//!
//! # Design Decisions
//! - The state is chosen at configuration time and swapped atomically
//! - Readers never block; a resolver runs on every `get_version` call
//! - Manifest failures are soft: the previous version stays in place

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// Resolver for a computed version.
pub type VersionResolver = Arc<dyn Fn() -> String + Send + Sync>;

/// How the asset version is obtained.
#[derive(Clone, Default)]
pub enum VersionState {
    /// No version configured; resolves to "".
    #[default]
    Unset,
    /// A pinned string.
    Fixed(String),
    /// Invoked on every lookup.
    Resolver(VersionResolver),
}

impl fmt::Debug for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionState::Unset => f.write_str("Unset"),
            VersionState::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            VersionState::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Shared, swappable asset version.
#[derive(Clone)]
pub struct VersionProvider {
    state: Arc<ArcSwap<VersionState>>,
}

impl VersionProvider {
    /// Create a provider with no version set.
    pub fn new() -> Self {
        Self {
            state: Arc::new(ArcSwap::from_pointee(VersionState::Unset)),
        }
    }

    /// Create a provider pinned to `version`.
    pub fn fixed(version: impl Into<String>) -> Self {
        let provider = Self::new();
        provider.set_version(version);
        provider
    }

    /// Pin a fixed version.
    pub fn set_version(&self, version: impl Into<String>) {
        self.state.store(Arc::new(VersionState::Fixed(version.into())));
    }

    /// Install a resolver invoked on every lookup.
    pub fn set_resolver<F>(&self, resolver: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.state.store(Arc::new(VersionState::Resolver(Arc::new(resolver))));
    }

    /// Pin the md5 of the manifest at `path` as the version.
    ///
    /// Returns false, leaving the current version untouched, when the file
    /// cannot be read.
    pub fn set_version_from_manifest(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match hash_manifest(path) {
            Ok(hash) => {
                tracing::info!(path = %path.display(), version = %hash, "Asset version loaded from manifest");
                self.set_version(hash);
                true
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No asset manifest; keeping current version");
                false
            }
        }
    }

    /// The current version, or "" when none is set.
    pub fn get_version(&self) -> String {
        let state = self.state.load_full();
        match state.as_ref() {
            VersionState::Unset => String::new(),
            VersionState::Fixed(v) => v.clone(),
            VersionState::Resolver(resolve) => resolve(),
        }
    }

    /// Snapshot of the configured state.
    pub fn state(&self) -> VersionState {
        self.state.load_full().as_ref().clone()
    }
}

impl Default for VersionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VersionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionProvider")
            .field("state", &self.state.load_full())
            .finish()
    }
}

/// Hex md5 of the file contents.
pub fn hash_manifest(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", md5::compute(&bytes)))
}
