//! Layered command data.
//!
//! Reads resolve instance data first, then the process-wide default store,
//! then the caller's default. Writes only ever touch the instance tier,
//! except through the explicit `*_default_data` functions.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::DataValue;

/// Process-wide defaults shared by every instance. Never cleared implicitly.
static DEFAULT_DATA: Mutex<BTreeMap<String, DataValue>> = Mutex::new(BTreeMap::new());

fn defaults() -> MutexGuard<'static, BTreeMap<String, DataValue>> {
    DEFAULT_DATA.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set a process-wide default value.
pub fn set_default_data(key: &str, value: impl Into<DataValue>) {
    defaults().insert(key.to_string(), value.into());
}

/// Read a process-wide default value.
pub fn get_default_data(key: &str) -> Option<DataValue> {
    defaults().get(key).cloned()
}

/// Merge a whole table into the process-wide defaults (later keys win).
pub fn seed_default_data(values: &BTreeMap<String, DataValue>) {
    let mut store = defaults();
    for (key, value) in values {
        store.insert(key.clone(), value.clone());
    }
    debug!("seed_default_data: {} keys", values.len());
}

/// Drop every process-wide default. Meant for test isolation.
pub fn reset_default_data() {
    defaults().clear();
}

/// Per-instance data with accumulated required keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    values: BTreeMap<String, DataValue>,
    required: Vec<String>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layered lookup: instance value (any value, `false` included), then
    /// process-wide default.
    pub fn get(&self, key: &str) -> Option<DataValue> {
        if let Some(value) = self.values.get(key) {
            trace!("get: {} from instance", key);
            return Some(value.clone());
        }
        get_default_data(key)
    }

    /// Layered lookup with a caller-supplied fallback.
    pub fn get_or(&self, key: &str, default: impl Into<DataValue>) -> DataValue {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Instance tier only, without consulting the defaults.
    pub fn local(&self, key: &str) -> Option<&DataValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Unconditional instance-scoped overwrite.
    pub fn set(&mut self, key: &str, value: impl Into<DataValue>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// First write stores the value; later writes to the same key turn it
    /// into a list and append.
    pub fn add(&mut self, key: &str, value: impl Into<DataValue>) -> &mut Self {
        let value = value.into();
        match self.values.get_mut(key) {
            Some(existing) => existing.push(value),
            None => {
                self.values.insert(key.to_string(), value);
            }
        }
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<DataValue> {
        self.values.remove(key)
    }

    /// Resolve `key` or fail with `MissingData`.
    pub fn expect(&self, key: &str) -> ApplicationResult<DataValue> {
        self.get(key).ok_or_else(|| ApplicationError::MissingData {
            key: key.to_string(),
        })
    }

    /// Register `keys` as required, then validate every key registered so far.
    pub fn expect_all(&mut self, keys: &[&str]) -> ApplicationResult<()> {
        for key in keys {
            if !self.required.iter().any(|k| k == key) {
                self.required.push(key.to_string());
            }
        }
        for key in &self.required {
            self.expect(key)?;
        }
        Ok(())
    }

    /// Keys accumulated by [`DataStore::expect_all`].
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DataValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
