use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::contracts::types::ItemType;
use crate::{CoreError, CoreResult};

pub const CACHE_FILE_NAME: &str = "food_or_non_food.json";

/// Load/save boundary for the persisted item-name classification map.
/// Injected into the extractor so tests can run without touching disk.
pub trait TypeCacheStore {
    fn load(&self) -> CoreResult<BTreeMap<String, ItemType>>;
    fn save(&self, entries: &BTreeMap<String, ItemType>) -> CoreResult<()>;
    fn describe(&self) -> String;
}

/// Flat JSON object on disk, `item_name -> "food" | "nonfood" | "unknown"`.
/// Created on first save; rewritten in full on every save. Last writer wins
/// across concurrent invocations.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TypeCacheStore for JsonFileStore {
    fn load(&self) -> CoreResult<BTreeMap<String, ItemType>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let body = fs::read_to_string(&self.path)
            .map_err(|error| CoreError::cache_read_failed(&self.path, &error.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|error| CoreError::cache_read_failed(&self.path, &error.to_string()))
    }

    fn save(&self, entries: &BTreeMap<String, ItemType>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|error| CoreError::cache_write_failed(&self.path, &error.to_string()))?;
        }
        let body = serde_json::to_string_pretty(entries)
            .map_err(|error| CoreError::internal_serialization(&error.to_string()))?;
        fs::write(&self.path, body)
            .map_err(|error| CoreError::cache_write_failed(&self.path, &error.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, ItemType>>,
}

impl MemoryStore {
    pub fn with_entries(entries: BTreeMap<String, ItemType>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, ItemType> {
        self.entries.borrow().clone()
    }
}

impl TypeCacheStore for MemoryStore {
    fn load(&self) -> CoreResult<BTreeMap<String, ItemType>> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &BTreeMap<String, ItemType>) -> CoreResult<()> {
        *self.entries.borrow_mut() = entries.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// The classification map for one extraction run: loaded once up front,
/// persisted once at the end when new names were inserted.
#[derive(Debug)]
pub struct TypeCache {
    entries: BTreeMap<String, ItemType>,
    inserts: i64,
}

impl TypeCache {
    pub fn load(store: &dyn TypeCacheStore) -> CoreResult<Self> {
        Ok(Self {
            entries: store.load()?,
            inserts: 0,
        })
    }

    /// Known names return their stored classification; names never seen
    /// before are recorded as `unknown`.
    pub fn lookup_or_insert(&mut self, name: &str) -> ItemType {
        if let Some(known) = self.entries.get(name) {
            return *known;
        }
        self.entries.insert(name.to_string(), ItemType::Unknown);
        self.inserts += 1;
        ItemType::Unknown
    }

    pub fn inserts(&self) -> i64 {
        self.inserts
    }

    pub fn persist_if_dirty(&self, store: &dyn TypeCacheStore) -> CoreResult<()> {
        if self.inserts == 0 {
            return Ok(());
        }
        store.save(&self.entries)
    }
}

/// Default cache location: `$PRICETRAIL_HOME/food_or_non_food.json`, falling
/// back to `~/.pricetrail/`.
pub fn default_cache_path(home_override: Option<&Path>) -> CoreResult<PathBuf> {
    let base = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("PRICETRAIL_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".pricetrail")
            } else {
                return Err(CoreError::home_not_resolvable());
            }
        }
    };
    Ok(base.join(CACHE_FILE_NAME))
}
