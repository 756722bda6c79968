use std::sync::RwLock;

use crate::entities::Order;
use crate::errors::ServiceError;

use super::OrderStore;

/// In-memory store for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }
}

impl OrderStore for MemoryStore {
    fn list(&self) -> Result<Vec<Order>, ServiceError> {
        let orders = self.orders.read().unwrap_or_else(|e| e.into_inner());
        Ok(orders.clone())
    }

    fn append(&self, mut new: Vec<Order>) -> Result<(), ServiceError> {
        let mut orders = self.orders.write().unwrap_or_else(|e| e.into_inner());
        orders.append(&mut new);
        Ok(())
    }

    fn replace(&self, new: Vec<Order>) -> Result<(), ServiceError> {
        let mut orders = self.orders.write().unwrap_or_else(|e| e.into_inner());
        *orders = new;
        Ok(())
    }
}
