// Core services
pub mod imports;
pub mod orders;

pub use imports::{ImportReport, ImportService};
pub use orders::{ListQuery, OrderFilter, OrderService, SortKey};
