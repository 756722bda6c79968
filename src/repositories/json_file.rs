use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::entities::Order;
use crate::errors::ServiceError;

use super::OrderStore;

/// Stores the order collection as one JSON array on disk.
///
/// Every read loads the whole array and every write rewrites it. Writes
/// land in a sibling temp file first and rename over the target, so an
/// interrupted write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, orders: &[Order]) -> Result<(), ServiceError> {
        let payload = serde_json::to_vec_pretty(orders)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &payload)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), records = orders.len(), "wrote order collection");
        Ok(())
    }
}

impl OrderStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Order>, ServiceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn append(&self, orders: Vec<Order>) -> Result<(), ServiceError> {
        let mut all = self.list()?;
        all.extend(orders);
        self.write_all(&all)
    }

    fn replace(&self, orders: Vec<Order>) -> Result<(), ServiceError> {
        self.write_all(&orders)
    }
}
