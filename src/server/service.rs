//! Catalog service
//!
//! Owns the live catalog generation. A generation bundles the catalog, the
//! keyword index built over it and a query cache, and is only ever replaced
//! as a whole by swapping one `Arc` under a write lock. Searches clone the
//! `Arc` under the read lock and run against that generation, so positions
//! from one index can never be resolved against another generation's
//! records.

use crate::catalog::types::{Catalog, Position, Record};
use crate::error::{LoadError, ServiceError};
use crate::index::keyword::KeywordIndex;
use crate::query::{parse_query, QueryExecutor};
use crate::server::protocol::StatusResponse;
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// One immutable (catalog, index) pair
pub struct Generation {
    number: u64,
    source: PathBuf,
    loaded_at: u64,
    catalog: Catalog,
    index: KeywordIndex,
    /// Hits only `peek` under the read lock, so they do not refresh recency
    /// and concurrent hits never wait on each other
    query_cache: Option<RwLock<LruCache<String, Vec<Position>>>>,
}

impl Generation {
    fn new(number: u64, source: PathBuf, catalog: Catalog, cache_size: usize) -> Self {
        let start = Instant::now();
        let index = KeywordIndex::build(&catalog);
        tracing::info!(
            generation = number,
            distinct_names = index.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "built keyword index"
        );

        let loaded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            number,
            source,
            loaded_at,
            catalog,
            index,
            query_cache: NonZeroUsize::new(cache_size).map(|n| RwLock::new(LruCache::new(n))),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Seconds since the unix epoch at which this generation was built
    pub fn loaded_at(&self) -> u64 {
        self.loaded_at
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// Run a query against this generation; returns matches and whether
    /// they came from the cache
    pub fn search(&self, query: &str) -> (Vec<Record>, bool) {
        let terms = parse_query(query);
        let executor = QueryExecutor::new(&self.catalog, &self.index);

        if terms.is_empty() {
            return (Vec::new(), false);
        }

        let key = terms.cache_key();
        if let Some(cache) = &self.query_cache
            && let Some(positions) = cache.read().peek(&key)
        {
            return (clone_records(executor.resolve(positions)), true);
        }

        let positions = executor.matching_positions(&terms);
        let records = clone_records(executor.resolve(&positions));

        if let Some(cache) = &self.query_cache {
            cache.write().put(key, positions);
        }

        (records, false)
    }
}

fn clone_records(records: Vec<&Record>) -> Vec<Record> {
    records.into_iter().cloned().collect()
}

/// Matches for one query along with the generation that produced them
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub generation: u64,
    pub records: Vec<Record>,
    pub cached: bool,
}

/// Result of a successful reload
#[derive(Debug, Clone)]
pub struct ReloadReport {
    pub generation: u64,
    pub records: usize,
    pub distinct_names: usize,
}

/// Statistics for the service
struct ServiceStats {
    start_time: Instant,
    queries_served: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl ServiceStats {
    fn new() -> Self {
        Self {
            start_time: Instant::now(),
            queries_served: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    fn cache_hit_rate(&self) -> f32 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f32 / total as f32
        }
    }
}

/// The catalog lookup service
pub struct CatalogService {
    /// Live generation; `None` until the first successful load
    current: RwLock<Option<Arc<Generation>>>,
    /// Serializes loads so only one writer builds and publishes at a time
    reload_gate: Mutex<()>,
    generations: AtomicU64,
    source: PathBuf,
    cache_size: usize,
    stats: ServiceStats,
}

impl CatalogService {
    /// Create a service with no generation loaded
    pub fn new(source: impl Into<PathBuf>, cache_size: usize) -> Arc<Self> {
        Arc::new(Self {
            current: RwLock::new(None),
            reload_gate: Mutex::new(()),
            generations: AtomicU64::new(0),
            source: source.into(),
            cache_size,
            stats: ServiceStats::new(),
        })
    }

    /// Configured catalog source
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Load the configured source and publish it as the new generation
    ///
    /// On failure nothing is published and the current generation, if any,
    /// keeps serving.
    pub fn reload(&self) -> Result<ReloadReport, LoadError> {
        let _writer = self.reload_gate.lock();

        let catalog = match Catalog::load(&self.source) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(
                    source = %self.source.display(),
                    error = %e,
                    "catalog load rejected, keeping current generation"
                );
                return Err(e);
            }
        };

        Ok(self.publish_locked(self.source.clone(), catalog))
    }

    /// Publish an already parsed catalog as the new generation
    pub fn publish(&self, source: impl Into<PathBuf>, catalog: Catalog) -> ReloadReport {
        let _writer = self.reload_gate.lock();
        self.publish_locked(source.into(), catalog)
    }

    fn publish_locked(&self, source: PathBuf, catalog: Catalog) -> ReloadReport {
        let number = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::new(Generation::new(number, source, catalog, self.cache_size));

        let report = ReloadReport {
            generation: number,
            records: generation.catalog().len(),
            distinct_names: generation.index().len(),
        };

        *self.current.write() = Some(generation);

        tracing::info!(
            generation = report.generation,
            records = report.records,
            distinct_names = report.distinct_names,
            "published catalog generation"
        );

        report
    }

    /// The live generation, if one has been published
    pub fn snapshot(&self) -> Option<Arc<Generation>> {
        self.current.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    /// Search the live generation
    pub fn search(&self, query: &str) -> Result<SearchOutcome, ServiceError> {
        let generation = self.snapshot().ok_or(ServiceError::NotReady)?;

        let (records, cached) = generation.search(query);

        self.stats.queries_served.fetch_add(1, Ordering::Relaxed);
        if cached {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);
        }

        Ok(SearchOutcome {
            generation: generation.number(),
            records,
            cached,
        })
    }

    pub fn status(&self) -> StatusResponse {
        let generation = self.snapshot();

        StatusResponse {
            uptime_secs: self.stats.start_time.elapsed().as_secs(),
            ready: generation.is_some(),
            generation: generation.as_ref().map(|g| g.number()),
            source: generation
                .as_ref()
                .map(|g| g.source().to_path_buf())
                .unwrap_or_else(|| self.source.clone()),
            records: generation.as_ref().map(|g| g.catalog().len()).unwrap_or(0),
            distinct_names: generation.as_ref().map(|g| g.index().len()).unwrap_or(0),
            loaded_at: generation.as_ref().map(|g| g.loaded_at()),
            queries_served: self.stats.queries_served.load(Ordering::Relaxed),
            cache_hit_rate: self.stats.cache_hit_rate(),
        }
    }
}
