//! In-memory document store backed by [`DashMap`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use dashmap::DashMap;
use tracing::debug;

use sales_core::config::DatabaseConfig;
use sales_core::error::AppError;
use sales_core::result::AppResult;
use sales_core::traits::{DeleteOptions, DocumentStore, FindOptions, StoreSession, UpdateOutcome};

use super::matcher::{MatchOptions, lookup, matches, sort_documents};

/// Documents of one collection plus its unique indexes.
#[derive(Debug, Default)]
struct CollectionState {
    documents: Vec<Document>,
    unique_indexes: Vec<Vec<String>>,
}

impl CollectionState {
    /// The index tuple a document occupies, as the server would build it.
    fn index_key(document: &Document, keys: &[String]) -> Vec<Bson> {
        keys.iter()
            .map(|key| {
                lookup(document, key)
                    .into_iter()
                    .next()
                    .cloned()
                    .unwrap_or(Bson::Null)
            })
            .collect()
    }

    /// Fail if `candidate` collides with any document other than `skip`.
    fn check_unique(
        &self,
        collection: &str,
        candidate: &Document,
        skip: Option<usize>,
    ) -> AppResult<()> {
        for keys in &self.unique_indexes {
            let key = Self::index_key(candidate, keys);
            let collision = self
                .documents
                .iter()
                .enumerate()
                .filter(|(position, _)| Some(*position) != skip)
                .any(|(_, existing)| Self::index_key(existing, keys) == key);
            if collision {
                return Err(AppError::duplicate_key(format!(
                    "E11000 duplicate key error collection: {collection} index: {}",
                    keys.join("_1_")
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct MemoryInner {
    collection_prefix: String,
    collections: DashMap<String, CollectionState>,
    open_sessions: AtomicUsize,
}

/// In-process document store.
///
/// Cloning shares the same data. Supports the query dialect described in
/// the matcher module, unique indexes, and case-insensitive deletes.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store with a collection name prefix.
    pub fn new(collection_prefix: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                collection_prefix: collection_prefix.into(),
                collections: DashMap::new(),
                open_sessions: AtomicUsize::new(0),
            }),
        }
    }

    /// Create an empty store from database configuration.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.collection_prefix.clone())
    }

    /// Number of sessions opened and not yet closed.
    pub fn open_session_count(&self) -> usize {
        self.inner.open_sessions.load(Ordering::SeqCst)
    }

    /// Every stored document of a logical collection, unfiltered.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        let name = self.inner.physical_name(collection);
        self.inner
            .collections
            .get(&name)
            .map(|state| state.documents.clone())
            .unwrap_or_default()
    }

    /// Insert a document directly, bypassing sessions (seeding).
    pub fn insert_raw(&self, collection: &str, document: Document) -> AppResult<()> {
        let name = self.inner.physical_name(collection);
        self.inner.insert(&name, document)
    }
}

impl MemoryInner {
    fn physical_name(&self, collection: &str) -> String {
        format!("{}{}", self.collection_prefix, collection)
    }

    fn insert(&self, name: &str, document: Document) -> AppResult<()> {
        let mut stored = Document::new();
        if !document.contains_key("_id") {
            stored.insert("_id", ObjectId::new());
        }
        stored.extend(document);

        let mut state = self.collections.entry(name.to_string()).or_default();
        state.check_unique(name, &stored, None)?;
        state.documents.push(stored);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn open_session(&self) -> AppResult<Arc<dyn StoreSession>> {
        let count = self.inner.open_sessions.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(open_sessions = count, "Opened memory store session");
        Ok(Arc::new(MemorySession {
            store: Arc::clone(&self.inner),
            closed: AtomicBool::new(false),
        }))
    }

    async fn ensure_unique_index(&self, collection: &str, keys: &[&str]) -> AppResult<()> {
        let name = self.inner.physical_name(collection);
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let mut state = self.inner.collections.entry(name).or_default();
        if !state.unique_indexes.contains(&keys) {
            state.unique_indexes.push(keys);
        }
        Ok(())
    }

    async fn ensure_index(&self, _collection: &str, _keys: &[&str]) -> AppResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn close(&self) {
        debug!("Memory store closed");
    }
}

/// Session over a [`MemoryStore`].
#[derive(Debug)]
pub struct MemorySession {
    store: Arc<MemoryInner>,
    closed: AtomicBool,
}

impl MemorySession {
    fn ensure_open(&self) -> AppResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AppError::closed_service("Store session is closed"));
        }
        Ok(())
    }

    /// Positions of documents matching `filter`, in insertion order.
    fn positions(
        documents: &[Document],
        filter: &Document,
        opts: MatchOptions,
    ) -> AppResult<Vec<usize>> {
        let mut found = Vec::new();
        for (position, document) in documents.iter().enumerate() {
            if matches(document, filter, opts)? {
                found.push(position);
            }
        }
        Ok(found)
    }
}

#[async_trait]
impl StoreSession for MemorySession {
    fn collection_name(&self, collection: &str) -> String {
        self.store.physical_name(collection)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        options: FindOptions,
    ) -> AppResult<Vec<Document>> {
        self.ensure_open()?;
        let Some(state) = self.store.collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut found = Vec::new();
        for document in &state.documents {
            if matches(document, &filter, MatchOptions::default())? {
                found.push(document.clone());
            }
        }
        drop(state);

        if let Some(sort) = &options.sort {
            sort_documents(&mut found, sort)?;
        }
        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let page = found.into_iter().skip(skip);
        Ok(match options.limit {
            0 => page.collect(),
            limit => page
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
        })
    }

    async fn find_one(&self, collection: &str, filter: Document) -> AppResult<Option<Document>> {
        self.ensure_open()?;
        let Some(state) = self.store.collections.get(collection) else {
            return Ok(None);
        };
        for document in &state.documents {
            if matches(document, &filter, MatchOptions::default())? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn count(&self, collection: &str, filter: Document) -> AppResult<u64> {
        self.ensure_open()?;
        let Some(state) = self.store.collections.get(collection) else {
            return Ok(0);
        };
        let positions = Self::positions(&state.documents, &filter, MatchOptions::default())?;
        Ok(positions.len() as u64)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<()> {
        self.ensure_open()?;
        self.store.insert(collection, document)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> AppResult<UpdateOutcome> {
        self.ensure_open()?;
        let Some(mut state) = self.store.collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        let Some(&position) = Self::positions(&state.documents, &filter, MatchOptions::default())?
            .first()
        else {
            return Ok(UpdateOutcome::default());
        };

        let mut updated = state.documents[position].clone();
        for (path, value) in set {
            set_path(&mut updated, &path, value)?;
        }
        let modified = updated != state.documents[position];
        if modified {
            state.check_unique(collection, &updated, Some(position))?;
            state.documents[position] = updated;
        }
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
        options: DeleteOptions,
    ) -> AppResult<u64> {
        self.ensure_open()?;
        let Some(mut state) = self.store.collections.get_mut(collection) else {
            return Ok(0);
        };
        let opts = MatchOptions {
            case_insensitive: options
                .collation
                .as_ref()
                .is_some_and(|collation| collation.case_insensitive),
        };
        match Self::positions(&state.documents, &filter, opts)?.first() {
            Some(&position) => {
                state.documents.remove(position);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            let remaining = self.store.open_sessions.fetch_sub(1, Ordering::SeqCst) - 1;
            debug!(open_sessions = remaining, "Closed memory store session");
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Assign `value` at a dotted path, creating sub-documents as needed.
fn set_path(document: &mut Document, path: &str, value: Bson) -> AppResult<()> {
    match path.split_once('.') {
        None => {
            document.insert(path, value);
            Ok(())
        }
        Some((head, rest)) => {
            if !document.contains_key(head) {
                document.insert(head, Document::new());
            }
            match document.get_mut(head) {
                Some(Bson::Document(child)) => set_path(child, rest, value),
                _ => Err(AppError::repository(format!(
                    "Cannot create field '{rest}' in element '{head}'"
                ))),
            }
        }
    }
}
