use super::load::{load_contract, parse_contract, DocFormat};
use super::types::Contract;
use anyhow::Context;
use arc_swap::ArcSwapOption;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Where the validation pipeline obtains its contract document.
///
/// The pipeline only ever calls [`resolve`](SchemaSource::resolve), so the
/// resolution strategy (re-read per request, remote fetch, cache) can be
/// swapped without touching any validation stage.
pub trait SchemaSource: Send + Sync {
    fn resolve(&self) -> anyhow::Result<Arc<Contract>>;
}

/// Re-reads and re-parses a file on every resolution.
///
/// This is the correctness baseline: edits to the document take effect on
/// the next request, at the cost of repeated parsing. Wrap in
/// [`CachedSource`] when throughput matters more than staleness.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl SchemaSource for FileSource {
    fn resolve(&self) -> anyhow::Result<Arc<Contract>> {
        Ok(Arc::new(load_contract(&self.path)?))
    }
}

/// Fetches the document over HTTP(S) on every resolution.
pub struct UrlSource {
    url: String,
}

impl UrlSource {
    pub fn new(url: impl Into<String>) -> Self {
        UrlSource { url: url.into() }
    }
}

impl SchemaSource for UrlSource {
    fn resolve(&self) -> anyhow::Result<Arc<Contract>> {
        let body = reqwest::blocking::get(&self.url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("failed to fetch contract document from {}", self.url))?
            .text()?;
        let contract = parse_contract(&body, DocFormat::from_path(&self.url))
            .with_context(|| format!("failed to parse contract document from {}", self.url))?;
        Ok(Arc::new(contract))
    }
}

/// Serves a pre-built document from memory. Useful for tests and for
/// embedding a contract in the binary.
pub struct StaticSource {
    contract: Arc<Contract>,
}

impl StaticSource {
    pub fn new(contract: Contract) -> Self {
        StaticSource {
            contract: Arc::new(contract),
        }
    }
}

impl SchemaSource for StaticSource {
    fn resolve(&self) -> anyhow::Result<Arc<Contract>> {
        Ok(self.contract.clone())
    }
}

/// Read-through cache over any other source.
///
/// The first resolution populates the cache; later resolutions are lock-free
/// reads. Call [`invalidate`](CachedSource::invalidate) when the underlying
/// document changes. Resolution failures are not cached.
pub struct CachedSource<S> {
    inner: S,
    cached: ArcSwapOption<Contract>,
}

impl<S: SchemaSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        CachedSource {
            inner,
            cached: ArcSwapOption::const_empty(),
        }
    }

    pub fn invalidate(&self) {
        debug!("contract cache invalidated");
        self.cached.store(None);
    }
}

impl<S: SchemaSource> SchemaSource for CachedSource<S> {
    fn resolve(&self) -> anyhow::Result<Arc<Contract>> {
        if let Some(contract) = self.cached.load_full() {
            return Ok(contract);
        }
        let fresh = self.inner.resolve()?;
        self.cached.store(Some(fresh.clone()));
        Ok(fresh)
    }
}
