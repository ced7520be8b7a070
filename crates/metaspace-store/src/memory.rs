//! In-memory filesystem for tests and embedding.
//!
//! [`InMemoryFilesystem`] keeps the committed files, the pending write
//! handles, the bucket registry and the creation counter in one [`State`]
//! behind a single `RwLock`, so create/commit/abort mutate them as a unit and
//! listings read a consistent snapshot. Each instance owns its own state;
//! nothing is shared between instances.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::{buf::Reader, Buf, Bytes, BytesMut};
use tracing::{debug, info, warn};

use metaspace_list::{list, ListOptions, Location, ObjectInfo, ObjectListing};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::{Filesystem, ReadHandle, WriteHandle};

/// Token identifying one write handle.
///
/// Tokens come from the per-store creation counter, so they also order
/// handles by creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    /// Creation sequence number of the handle.
    pub fn sequence(&self) -> u64 {
        self.0
    }

    /// Creation time surrogate used in listings.
    fn created(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.0)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct FileData {
    contents: Bytes,
    created: HandleId,
}

#[derive(Debug, Default)]
struct State {
    /// Last issued creation sequence number.
    created: u64,
    files: BTreeMap<Location, FileData>,
    /// Never holds an empty set: a location with no open handles is absent.
    pending: BTreeMap<Location, BTreeSet<HandleId>>,
    buckets: BTreeSet<String>,
}

impl State {
    fn next_handle(&mut self) -> HandleId {
        self.created += 1;
        HandleId(self.created)
    }

    fn remove_pending(&mut self, location: &Location, id: HandleId) -> bool {
        let Some(handles) = self.pending.get_mut(location) else {
            return false;
        };
        let removed = handles.remove(&id);
        if handles.is_empty() {
            self.pending.remove(location);
        }
        removed
    }
}

type SharedState = Arc<RwLock<State>>;

fn read_state(state: &RwLock<State>) -> StoreResult<RwLockReadGuard<'_, State>> {
    state
        .read()
        .map_err(|e| StoreError::LockPoisoned(e.to_string()))
}

fn write_state(state: &RwLock<State>) -> StoreResult<RwLockWriteGuard<'_, State>> {
    state
        .write()
        .map_err(|e| StoreError::LockPoisoned(e.to_string()))
}

/// An in-memory implementation of [`Filesystem`].
///
/// Data is lost when the store is dropped. Clones share the same state.
#[derive(Clone)]
pub struct InMemoryFilesystem {
    state: SharedState,
    config: StoreConfig,
}

impl InMemoryFilesystem {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store and register the configured buckets.
    pub fn with_config(config: StoreConfig) -> Self {
        let state = State {
            buckets: config.buckets.iter().cloned().collect(),
            ..State::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Register a bucket so remote locations inside it can be created.
    pub fn ensure_bucket(&self, name: &str) -> StoreResult<()> {
        let mut state = write_state(&self.state)?;
        if state.buckets.insert(name.to_string()) {
            info!(bucket = name, "bucket registered");
        }
        Ok(())
    }

    pub fn has_bucket(&self, name: &str) -> StoreResult<bool> {
        Ok(read_state(&self.state)?.buckets.contains(name))
    }

    /// All committed files with their contents, ordered by location.
    pub fn files(&self) -> StoreResult<Vec<(Location, Bytes)>> {
        let state = read_state(&self.state)?;
        Ok(state
            .files
            .iter()
            .map(|(loc, data)| (loc.clone(), data.contents.clone()))
            .collect())
    }

    /// Number of open write handles for `location`.
    pub fn pending_count(&self, location: &Location) -> StoreResult<usize> {
        let state = read_state(&self.state)?;
        Ok(state.pending.get(location).map_or(0, BTreeSet::len))
    }

    /// Returns `true` if `location` has at least one open write handle.
    pub fn has_pending(&self, location: &Location) -> StoreResult<bool> {
        Ok(read_state(&self.state)?.pending.contains_key(location))
    }

    /// Explicit page sizes are clamped to the configured maximum. Listings
    /// without a limit run until the source is exhausted.
    fn page_options(&self, options: &ListOptions) -> ListOptions {
        ListOptions {
            limit: options.limit.map(|n| self.config.clamp_limit(n)),
            ..options.clone()
        }
    }
}

impl Default for InMemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryFilesystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("InMemoryFilesystem");
        match self.state.read() {
            Ok(state) => out
                .field("files", &state.files.len())
                .field("pending", &state.pending.len())
                .field("buckets", &state.buckets.len()),
            Err(_) => out.field("state", &"<poisoned>"),
        };
        out.finish()
    }
}

impl Filesystem for InMemoryFilesystem {
    fn open(&self, location: &Location) -> StoreResult<Box<dyn ReadHandle>> {
        let state = read_state(&self.state)?;
        let data = state
            .files
            .get(location)
            .ok_or_else(|| StoreError::NotFound(location.clone()))?;
        Ok(Box::new(MemReadHandle {
            reader: data.contents.clone().reader(),
            info: ObjectInfo::new(location.clone(), data.created.created()),
        }))
    }

    fn create(&self, location: &Location) -> StoreResult<Box<dyn WriteHandle>> {
        let mut state = write_state(&self.state)?;
        if let Some((bucket, _)) = location.remote_parts() {
            if !state.buckets.contains(bucket) {
                warn!(%location, bucket, "create rejected: bucket not found");
                return Err(StoreError::BucketNotFound(bucket.to_string()));
            }
        }

        let id = state.next_handle();
        state
            .pending
            .entry(location.clone())
            .or_default()
            .insert(id);
        debug!(%location, handle = %id, "write handle created");

        Ok(Box::new(MemWriteHandle {
            state: Arc::clone(&self.state),
            location: location.clone(),
            id,
            buf: BytesMut::new(),
            done: false,
        }))
    }

    fn remove(&self, location: &Location) -> StoreResult<()> {
        let mut state = write_state(&self.state)?;
        match state.files.remove(location) {
            Some(_) => {
                debug!(%location, "file removed");
                Ok(())
            }
            None => Err(StoreError::NotFound(location.clone())),
        }
    }

    fn list_objects_with(&self, options: &ListOptions) -> StoreResult<ObjectListing> {
        let prefix = &options.prefix;
        let snapshot: Vec<ObjectInfo> = {
            let state = read_state(&self.state)?;
            state
                .files
                .range(prefix.clone()..)
                .take_while(|(loc, _)| loc.has_prefix(prefix))
                .map(|(loc, data)| ObjectInfo::new(loc.clone(), data.created.created()))
                .collect()
        };
        debug!(%prefix, recursive = options.recursive, entries = snapshot.len(), "listing objects");
        Ok(list(snapshot.into_iter().map(Ok), &self.page_options(options)))
    }

    fn list_uploads_with(&self, options: &ListOptions) -> StoreResult<ObjectListing> {
        let prefix = &options.prefix;
        let snapshot: Vec<ObjectInfo> = {
            let state = read_state(&self.state)?;
            state
                .pending
                .range(prefix.clone()..)
                .take_while(|(loc, _)| loc.has_prefix(prefix))
                .flat_map(|(loc, handles)| {
                    handles
                        .iter()
                        .map(move |id| ObjectInfo::pending(loc.clone(), id.created()))
                })
                .collect()
        };
        debug!(%prefix, recursive = options.recursive, entries = snapshot.len(), "listing uploads");
        Ok(list(snapshot.into_iter().map(Ok), &self.page_options(options)))
    }
}

/// Reader over a committed file's contents.
pub struct MemReadHandle {
    reader: Reader<Bytes>,
    info: ObjectInfo,
}

impl Read for MemReadHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl ReadHandle for MemReadHandle {
    fn info(&self) -> &ObjectInfo {
        &self.info
    }
}

/// Pending upload into an [`InMemoryFilesystem`].
///
/// Dropping the handle without finalizing leaves the upload pending.
pub struct MemWriteHandle {
    state: SharedState,
    location: Location,
    id: HandleId,
    buf: BytesMut,
    done: bool,
}

impl MemWriteHandle {
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Mark the handle done and drop it from the pending set.
    fn finalize(&mut self, state: &mut State) -> StoreResult<()> {
        if self.done {
            warn!(location = %self.location, handle = %self.id, "write handle already finalized");
            return Err(StoreError::AlreadyFinalized(self.location.clone()));
        }
        self.done = true;
        state.remove_pending(&self.location, self.id);
        Ok(())
    }
}

impl Write for MemWriteHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.done {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                StoreError::AlreadyFinalized(self.location.clone()),
            ));
        }
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteHandle for MemWriteHandle {
    fn commit(&mut self) -> StoreResult<()> {
        let shared = Arc::clone(&self.state);
        let mut state = write_state(&shared)?;
        self.finalize(&mut state)?;

        let contents = self.buf.split().freeze();
        debug!(location = %self.location, handle = %self.id, bytes = contents.len(), "upload committed");
        state.files.insert(
            self.location.clone(),
            FileData {
                contents,
                created: self.id,
            },
        );
        Ok(())
    }

    fn abort(&mut self) -> StoreResult<()> {
        let shared = Arc::clone(&self.state);
        let mut state = write_state(&shared)?;
        self.finalize(&mut state)?;
        self.buf.clear();
        debug!(location = %self.location, handle = %self.id, "upload aborted");
        Ok(())
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn info(&self) -> ObjectInfo {
        ObjectInfo::pending(self.location.clone(), self.id.created())
    }
}

impl fmt::Debug for MemWriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemWriteHandle")
            .field("location", &self.location)
            .field("id", &self.id)
            .field("buffered", &self.buf.len())
            .field("done", &self.done)
            .finish()
    }
}
