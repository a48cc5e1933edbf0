//! # JSON File Store
//!
//! Durable CRUD over a collection of products kept in one JSON file.
//!
//! Every mutation is a whole-collection cycle:
//! 1. Read and parse the entire file
//! 2. Mutate the collection in memory
//! 3. Serialize and replace the entire file
//!
//! Mutations are serialized behind one async mutex, so at most one write is
//! in flight per store and every later operation sees its result. The file
//! is replaced atomically (temp file, fsync, rename), which lets reads skip
//! the lock: a reader sees either the old or the new collection, never a
//! truncated one.
//!
//! The lock is per store instance. Two processes (or two stores) pointed at
//! the same file can still overwrite each other.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::Error as _;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::config::{IdPolicy, StoreConfig};
use super::envelope::DbResult;
use super::errors::{StoreError, StoreResult};
use super::ids::{next_id, IdMeta};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::product::{NewProduct, Product, ProductId, ProductPatch};

/// Record store backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    data_path: PathBuf,
    meta_path: PathBuf,
    id_policy: IdPolicy,
    write_lock: Mutex<()>,
    metrics: Arc<MetricsRegistry>,
}

impl JsonFileStore {
    /// Open (and if needed create) the store described by `config`.
    ///
    /// Initialization failures are returned as `Err`: there is no store to
    /// wrap them in an envelope yet.
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        Self::open_with_metrics(config, Arc::new(MetricsRegistry::new())).await
    }

    /// Open the store, recording operation counters into `metrics`
    pub async fn open_with_metrics(
        config: &StoreConfig,
        metrics: Arc<MetricsRegistry>,
    ) -> StoreResult<Self> {
        ensure_data_dir(&config.data_dir).await?;

        let store = Self {
            data_path: config.data_path(),
            meta_path: config.meta_path(),
            id_policy: config.id_policy,
            write_lock: Mutex::new(()),
            metrics,
        };
        store.initialize(config.seed_path.as_deref()).await?;

        log_event_with_fields(
            Event::StoreOpened,
            &[
                ("path", &store.data_path.display().to_string()),
                ("id_policy", store.id_policy_name()),
            ],
        );
        Ok(store)
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// All records in insertion order
    pub async fn read_all(&self) -> DbResult<Vec<Product>> {
        match self.load().await {
            Ok(products) => DbResult::success(products, "Products retrieved successfully"),
            Err(e) => self.failed(Event::StoreReadFailed, e, "Failed to read products"),
        }
    }

    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Product> {
        let products = match self.load().await {
            Ok(products) => products,
            Err(e) => return self.failed(Event::StoreReadFailed, e, "Failed to retrieve product"),
        };

        match products.into_iter().find(|p| p.id == id) {
            Some(product) => DbResult::success(product, "Product retrieved successfully"),
            None => self.not_found(id),
        }
    }

    /// Appends a record with a store-assigned id
    pub async fn create(&self, new: NewProduct) -> DbResult<Product> {
        let _guard = self.write_lock.lock().await;

        let mut products = match self.load().await {
            Ok(products) => products,
            Err(e) => return self.failed(Event::StoreReadFailed, e, "Failed to create product"),
        };
        let last_issued = match self.last_issued_id().await {
            Ok(id) => id,
            Err(e) => return self.failed(Event::StoreReadFailed, e, "Failed to create product"),
        };

        let Some(id) = next_id(self.id_policy, &products, last_issued) else {
            return self.failed(
                Event::StoreWriteFailed,
                StoreError::IdsExhausted,
                "Failed to create product",
            );
        };
        let product = Product::from_new(id, new);
        products.push(product.clone());

        if let Err(e) = self.persist(&products).await {
            return self.failed(Event::StoreWriteFailed, e, "Failed to save new product");
        }
        if self.id_policy == IdPolicy::Monotonic {
            // The record is already durable; a stale sidecar is repaired by
            // the max() in next_id, so this only warrants a log line.
            if let Err(e) = self.persist_last_id(id).await {
                log_event_with_fields(
                    Event::StoreWriteFailed,
                    &[("detail", &e.to_string()), ("path", &self.meta_path.display().to_string())],
                );
            }
        }

        self.metrics.increment_created();
        log_event_with_fields(
            Event::ProductCreated,
            &[("id", &id.to_string()), ("name", &product.name)],
        );
        DbResult::success(product, "Product created successfully")
    }

    /// Field-level partial update; absent fields keep their value
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> DbResult<Product> {
        let _guard = self.write_lock.lock().await;

        let mut products = match self.load().await {
            Ok(products) => products,
            Err(e) => return self.failed(Event::StoreReadFailed, e, "Failed to update product"),
        };
        let Some(index) = products.iter().position(|p| p.id == id) else {
            return self.not_found(id);
        };

        products[index].apply(patch);
        let updated = products[index].clone();

        if let Err(e) = self.persist(&products).await {
            return self.failed(Event::StoreWriteFailed, e, "Failed to save updated product");
        }

        self.metrics.increment_updated();
        log_event_with_fields(Event::ProductUpdated, &[("id", &id.to_string())]);
        DbResult::success(updated, "Product updated successfully")
    }

    /// Removes a record. No tombstone is kept.
    pub async fn delete(&self, id: ProductId) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut products = match self.load().await {
            Ok(products) => products,
            Err(e) => return self.failed(Event::StoreReadFailed, e, "Failed to delete product"),
        };
        let Some(index) = products.iter().position(|p| p.id == id) else {
            return self.not_found(id);
        };

        // Records that predate the sidecar (seeded data) must not have
        // their ids handed out again once removed.
        if let Err(e) = self.raise_high_water(&products).await {
            return self.failed(Event::StoreWriteFailed, e, "Failed to delete product");
        }

        products.remove(index);
        if let Err(e) = self.persist(&products).await {
            return self.failed(Event::StoreWriteFailed, e, "Failed to save after deletion");
        }

        self.metrics.increment_deleted();
        log_event_with_fields(Event::ProductDeleted, &[("id", &id.to_string())]);
        DbResult::success((), "Product deleted successfully")
    }

    /// Case-insensitive exact match on category
    pub async fn find_by_category(&self, category: &str) -> DbResult<Vec<Product>> {
        let products = match self.load().await {
            Ok(products) => products,
            Err(e) => {
                return self.failed(
                    Event::StoreReadFailed,
                    e,
                    "Failed to retrieve products by category",
                )
            }
        };

        let wanted = category.to_lowercase();
        let matches: Vec<Product> = products
            .into_iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect();
        let message = format!("Found {} products in category: {}", matches.len(), category);
        DbResult::success(matches, message)
    }

    /// Case-insensitive substring match on name
    pub async fn find_by_name_contains(&self, query: &str) -> DbResult<Vec<Product>> {
        let products = match self.load().await {
            Ok(products) => products,
            Err(e) => return self.failed(Event::StoreReadFailed, e, "Failed to search products"),
        };

        let needle = query.to_lowercase();
        let matches: Vec<Product> = products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();
        let message = format!("Found {} products matching: {}", matches.len(), query);
        DbResult::success(matches, message)
    }

    // ==================
    // Internals
    // ==================

    async fn initialize(&self, seed_path: Option<&Path>) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        if path_exists(&self.data_path).await? {
            return Ok(());
        }

        let seed = match seed_path {
            Some(path) if path_exists(path).await? => Some(path),
            _ => None,
        };

        match seed {
            Some(seed) => {
                let raw = fs::read_to_string(seed)
                    .await
                    .map_err(|e| StoreError::io("failed to read seed dataset", e))?;
                let products = parse_products(&raw, seed)?;
                self.persist(&products).await?;
                log_event_with_fields(
                    Event::StoreSeeded,
                    &[
                        ("count", &products.len().to_string()),
                        ("seed", &seed.display().to_string()),
                    ],
                );
            }
            None => {
                self.persist(&[]).await?;
                log_event_with_fields(
                    Event::StoreCreated,
                    &[("path", &self.data_path.display().to_string())],
                );
            }
        }
        Ok(())
    }

    async fn load(&self) -> StoreResult<Vec<Product>> {
        self.metrics.increment_reads();
        let raw = fs::read_to_string(&self.data_path)
            .await
            .map_err(|e| StoreError::io("failed to read products", e))?;
        parse_products(&raw, &self.data_path)
    }

    async fn persist(&self, products: &[Product]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(products).map_err(StoreError::Serialize)?;
        write_atomic(&self.data_path, &bytes)
            .await
            .map_err(|e| StoreError::io("failed to write products", e))?;
        self.metrics.increment_writes();
        Ok(())
    }

    /// Highest id previously issued, 0 under `MaxPlusOne` or with no sidecar
    async fn last_issued_id(&self) -> StoreResult<ProductId> {
        if self.id_policy != IdPolicy::Monotonic || !path_exists(&self.meta_path).await? {
            return Ok(0);
        }
        let raw = fs::read_to_string(&self.meta_path)
            .await
            .map_err(|e| StoreError::io("failed to read id metadata", e))?;
        let meta: IdMeta = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.meta_path.display().to_string(),
            source,
        })?;
        Ok(meta.last_id)
    }

    async fn persist_last_id(&self, last_id: ProductId) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec_pretty(&IdMeta { last_id }).map_err(StoreError::Serialize)?;
        write_atomic(&self.meta_path, &bytes)
            .await
            .map_err(|e| StoreError::io("failed to write id metadata", e))
    }

    async fn raise_high_water(&self, products: &[Product]) -> StoreResult<()> {
        if self.id_policy != IdPolicy::Monotonic {
            return Ok(());
        }
        let last_issued = self.last_issued_id().await?;
        let max_live = products.iter().map(|p| p.id).max().unwrap_or(0);
        if max_live > last_issued {
            self.persist_last_id(max_live).await?;
        }
        Ok(())
    }

    fn not_found<T>(&self, id: ProductId) -> DbResult<T> {
        self.metrics.increment_not_found();
        DbResult::failure(
            StoreError::NotFound(id),
            format!("Product with ID {} not found", id),
        )
    }

    fn failed<T>(&self, event: Event, error: StoreError, message: &str) -> DbResult<T> {
        self.metrics.increment_store_failures();
        log_event_with_fields(
            event,
            &[
                ("detail", &error.to_string()),
                ("operation", message),
                ("path", &self.data_path.display().to_string()),
            ],
        );
        DbResult::failure(error, message)
    }

    fn id_policy_name(&self) -> &'static str {
        match self.id_policy {
            IdPolicy::Monotonic => "monotonic",
            IdPolicy::MaxPlusOne => "max_plus_one",
        }
    }
}

/// Parses the backing array and rejects zero or repeated ids
fn parse_products(raw: &str, path: &Path) -> StoreResult<Vec<Product>> {
    let parse_error = |source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    };
    let products: Vec<Product> = serde_json::from_str(raw).map_err(parse_error)?;

    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
        if product.id == 0 {
            return Err(parse_error(serde_json::Error::custom(
                "product id must be positive",
            )));
        }
        if !seen.insert(product.id) {
            return Err(parse_error(serde_json::Error::custom(format!(
                "duplicate product id {}",
                product.id
            ))));
        }
    }
    Ok(products)
}

async fn path_exists(path: &Path) -> StoreResult<bool> {
    fs::try_exists(path)
        .await
        .map_err(|e| StoreError::io("failed to stat path", e))
}

async fn ensure_data_dir(dir: &Path) -> StoreResult<()> {
    if path_exists(dir).await? {
        return Ok(());
    }
    fs::create_dir_all(dir)
        .await
        .map_err(|e| StoreError::io("failed to create data directory", e))?;
    log_event_with_fields(Event::DataDirCreated, &[("path", &dir.display().to_string())]);
    Ok(())
}

/// Replace `path` with `bytes` atomically.
///
/// 1. Write to a uniquely named temp file in the same directory
/// 2. fsync the temp file
/// 3. Rename over the target (atomic on POSIX)
/// 4. fsync the directory so the rename itself is durable
async fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("store");
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

    let written = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await
    }
    .await;

    if written.is_err() {
        let _ = fs::remove_file(&temp_path).await;
        return written;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = fs::File::open(parent).await {
            let _ = dir.sync_all().await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_atomic_replaces_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");

        write_atomic(&path, b"[1]").await.unwrap();
        write_atomic(&path, b"[1, 2]").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2]");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_write_atomic_fails_when_directory_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("products.json");
        assert!(write_atomic(&path, b"[]").await.is_err());
    }

    #[tokio::test]
    async fn test_open_creates_nested_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::in_dir(dir.path().join("a").join("b"));

        let store = JsonFileStore::open(&config).await.unwrap();
        assert!(store.data_path().exists());
        assert_eq!(std::fs::read_to_string(store.data_path()).unwrap(), "[]");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_products(r#"{"id": 1}"#, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    fn record(id: u64) -> String {
        format!(
            r#"{{"id": {}, "name": "Lamp", "category": "Home", "price": 5.0, "stock": 1, "rating": 4.0}}"#,
            id
        )
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let raw = format!("[{}, {}, {}]", record(1), record(2), record(1));
        let err = parse_products(&raw, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("duplicate product id 1"));
    }

    #[test]
    fn test_parse_rejects_zero_id() {
        let raw = format!("[{}]", record(0));
        let err = parse_products(&raw, Path::new("x.json")).unwrap_err();
        assert!(err.to_string().contains("product id must be positive"));
    }

    #[test]
    fn test_parse_accepts_unordered_unique_ids() {
        let raw = format!("[{}, {}, {}]", record(9), record(2), record(5));
        let ids: Vec<_> = parse_products(&raw, Path::new("x.json"))
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }
}
