use crate::entities::Order;
use crate::errors::ServiceError;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Backing store for the order collection.
///
/// The collection lives in a single named slot that is read and written
/// in full; mutation is whole-collection by design. Last writer wins,
/// which is acceptable because at most one flow is active at a time.
pub trait OrderStore: Send + Sync {
    /// Reads the entire collection. A slot that has never been written
    /// lists as the empty collection.
    fn list(&self) -> Result<Vec<Order>, ServiceError>;

    /// Appends the given records to the collection in one write.
    fn append(&self, orders: Vec<Order>) -> Result<(), ServiceError>;

    /// Overwrites the entire collection.
    fn replace(&self, orders: Vec<Order>) -> Result<(), ServiceError>;
}
