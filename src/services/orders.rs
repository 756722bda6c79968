use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{Order, ShippingStatus};
use crate::errors::ServiceError;
use crate::repositories::OrderStore;
use crate::PaginatedResponse;

/// Default page size of the order listing.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Filter criteria for the order listing. Empty criteria match
/// everything; set criteria combine with AND.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Exact order-number match.
    pub order_number: Option<String>,
    /// Case-insensitive substring of the customer name.
    pub customer_name: Option<String>,
    /// Inclusive lower bound on the order date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the order date.
    pub date_to: Option<NaiveDate>,
    pub status: Option<ShippingStatus>,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        if let Some(number) = &self.order_number {
            if &order.order_number != number {
                return false;
            }
        }
        if let Some(customer) = &self.customer_name {
            let haystack = order.customer_name.to_lowercase();
            if !haystack.contains(&customer.to_lowercase()) {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if order.order_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if order.order_date > to {
                return false;
            }
        }
        if let Some(status) = self.status {
            if order.shipping_status != status {
                return false;
            }
        }
        true
    }
}

/// Columns the listing can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SortKey {
    OrderNumber,
    OrderDate,
    CustomerName,
    ProductName,
    Quantity,
    Status,
}

/// Parameters of one listing call.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub filter: OrderFilter,
    pub sort: Option<SortKey>,
    pub descending: bool,
    /// 1-based; out-of-range pages clamp to the valid range.
    pub page: u64,
    pub limit: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: OrderFilter::default(),
            sort: None,
            descending: false,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Service for querying the order collection and issuing shipping
/// instructions.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Lists orders: filter, sort, then paginate.
    #[instrument(skip(self, query), fields(page = query.page, limit = query.limit))]
    pub fn list(&self, query: &ListQuery) -> Result<PaginatedResponse<Order>, ServiceError> {
        let mut orders = self.store.list()?;
        orders.retain(|order| query.filter.matches(order));

        if let Some(key) = query.sort {
            sort_orders(&mut orders, key, query.descending);
        }

        let total = orders.len() as u64;
        let limit = query.limit.max(1);
        let total_pages = total.div_ceil(limit).max(1);
        let page = query.page.clamp(1, total_pages);
        let start = ((page - 1) * limit) as usize;

        let items: Vec<Order> = orders
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();

        info!(total, page, returned = items.len(), "listed orders");

        Ok(PaginatedResponse {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    /// Fetches one order by identifier.
    #[instrument(skip(self), fields(order_id = %id))]
    pub fn get(&self, id: Uuid) -> Result<Order, ServiceError> {
        self.store
            .list()?
            .into_iter()
            .find(|order| order.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("order {id}")))
    }

    /// Fetches one order by its business key.
    #[instrument(skip(self), fields(order_number = %number))]
    pub fn get_by_order_number(&self, number: &str) -> Result<Order, ServiceError> {
        self.store
            .list()?
            .into_iter()
            .find(|order| order.order_number == number)
            .ok_or_else(|| ServiceError::not_found(format!("order number {number}")))
    }

    /// Issues the shipping instruction for the selected orders, stamped
    /// with today's date (UTC). Returns how many orders transitioned.
    #[instrument(skip(self, ids), fields(selected = ids.len()))]
    pub fn ship(&self, ids: &[Uuid]) -> Result<usize, ServiceError> {
        self.ship_on(ids, Utc::now().date_naive())
    }

    /// Same as [`ship`](Self::ship) with an explicit shipping date.
    ///
    /// Orders already shipped keep their original stamp and unknown
    /// identifiers are ignored; the collection is persisted once after
    /// all transitions are applied.
    pub fn ship_on(&self, ids: &[Uuid], date: NaiveDate) -> Result<usize, ServiceError> {
        let selected: HashSet<Uuid> = ids.iter().copied().collect();
        let mut orders = self.store.list()?;

        let mut shipped = 0usize;
        for order in orders.iter_mut() {
            if selected.contains(&order.id) && order.ship(date) {
                shipped += 1;
            }
        }

        self.store.replace(orders)?;
        info!(shipped, "shipping instruction applied");
        Ok(shipped)
    }
}

fn sort_orders(orders: &mut [Order], key: SortKey, descending: bool) {
    orders.sort_by(|a, b| {
        let ordering = match key {
            SortKey::OrderNumber => a.order_number.cmp(&b.order_number),
            SortKey::OrderDate => a.order_date.cmp(&b.order_date),
            SortKey::CustomerName => a.customer_name.cmp(&b.customer_name),
            SortKey::ProductName => a.product_name.cmp(&b.product_name),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::Status => a.shipping_status.cmp(&b.shipping_status),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn order(number: &str, date: (i32, u32, u32), customer: &str, quantity: Decimal) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: number.to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            customer_code: String::new(),
            customer_name: customer.to_string(),
            product_code: String::new(),
            product_name: "商品".to_string(),
            quantity,
            unit_price: dec!(100),
            amount: dec!(100) * quantity,
            delivery_date: None,
            delivery_address: String::new(),
            delivery_phone: String::new(),
            shipping_status: ShippingStatus::Unshipped,
            shipping_date: None,
            remarks: String::new(),
            created_at: Utc::now(),
        }
    }

    fn service_with(orders: Vec<Order>) -> OrderService {
        OrderService::new(Arc::new(MemoryStore::with_orders(orders)))
    }

    fn sample_set() -> Vec<Order> {
        vec![
            order("ORD-1", (2024, 1, 10), "山田商事", dec!(5)),
            order("ORD-2", (2024, 2, 15), "鈴木物産", dec!(30)),
            order("ORD-3", (2024, 3, 20), "やまだ運輸", dec!(9)),
        ]
    }

    #[test]
    fn filter_by_exact_order_number() {
        let service = service_with(sample_set());
        let query = ListQuery {
            filter: OrderFilter {
                order_number: Some("ORD-2".to_string()),
                ..OrderFilter::default()
            },
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].order_number, "ORD-2");
    }

    #[test]
    fn filter_by_customer_substring_ignores_case() {
        let mut orders = sample_set();
        orders.push(order("ORD-4", (2024, 4, 1), "YAMADA TRADING", dec!(1)));
        let service = service_with(orders);

        let query = ListQuery {
            filter: OrderFilter {
                customer_name: Some("yamada".to_string()),
                ..OrderFilter::default()
            },
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].order_number, "ORD-4");
    }

    #[test]
    fn filter_by_date_range_is_inclusive() {
        let service = service_with(sample_set());
        let query = ListQuery {
            filter: OrderFilter {
                date_from: NaiveDate::from_ymd_opt(2024, 2, 15),
                date_to: NaiveDate::from_ymd_opt(2024, 3, 20),
                ..OrderFilter::default()
            },
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        let numbers: Vec<&str> = page.items.iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["ORD-2", "ORD-3"]);
    }

    #[test]
    fn filter_by_status() {
        let mut orders = sample_set();
        orders[1].ship(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let service = service_with(orders);

        let query = ListQuery {
            filter: OrderFilter {
                status: Some(ShippingStatus::Shipped),
                ..OrderFilter::default()
            },
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].order_number, "ORD-2");
    }

    #[test]
    fn sort_by_quantity_is_numeric() {
        let service = service_with(sample_set());
        let query = ListQuery {
            sort: Some(SortKey::Quantity),
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        let quantities: Vec<Decimal> = page.items.iter().map(|o| o.quantity).collect();
        assert_eq!(quantities, vec![dec!(5), dec!(9), dec!(30)]);
    }

    #[test]
    fn sort_descending_reverses() {
        let service = service_with(sample_set());
        let query = ListQuery {
            sort: Some(SortKey::OrderDate),
            descending: true,
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        let numbers: Vec<&str> = page.items.iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["ORD-3", "ORD-2", "ORD-1"]);
    }

    #[test]
    fn pagination_slices_and_reports_totals() {
        let orders: Vec<Order> = (1..=45)
            .map(|i| order(&format!("ORD-{i:03}"), (2024, 1, 1), "顧客", dec!(1)))
            .collect();
        let service = service_with(orders);

        let query = ListQuery {
            page: 3,
            limit: 20,
            ..ListQuery::default()
        };
        let page = service.list(&query).unwrap();

        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].order_number, "ORD-041");
    }

    #[test]
    fn out_of_range_page_clamps() {
        let service = service_with(sample_set());
        let query = ListQuery {
            page: 99,
            ..ListQuery::default()
        };

        let page = service.list(&query).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn get_by_id_and_by_number() {
        let orders = sample_set();
        let id = orders[1].id;
        let service = service_with(orders);

        assert_eq!(service.get(id).unwrap().order_number, "ORD-2");
        assert_eq!(
            service.get_by_order_number("ORD-3").unwrap().customer_name,
            "やまだ運輸"
        );
        assert!(matches!(
            service.get(Uuid::new_v4()),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.get_by_order_number("ORD-999"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn ship_transitions_selected_unshipped_orders() {
        let orders = sample_set();
        let ids = vec![orders[0].id, orders[2].id];
        let store = Arc::new(MemoryStore::with_orders(orders));
        let service = OrderService::new(store.clone());
        let day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        let shipped = service.ship_on(&ids, day).unwrap();
        assert_eq!(shipped, 2);

        let all = store.list().unwrap();
        assert_eq!(all[0].shipping_status, ShippingStatus::Shipped);
        assert_eq!(all[0].shipping_date, Some(day));
        assert_eq!(all[1].shipping_status, ShippingStatus::Unshipped);
        assert!(all[1].shipping_date.is_none());
        assert_eq!(all[2].shipping_status, ShippingStatus::Shipped);
    }

    #[test]
    fn ship_twice_is_idempotent() {
        let orders = sample_set();
        let ids = vec![orders[0].id];
        let store = Arc::new(MemoryStore::with_orders(orders));
        let service = OrderService::new(store.clone());

        let first_day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(service.ship_on(&ids, first_day).unwrap(), 1);

        let second_day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        assert_eq!(service.ship_on(&ids, second_day).unwrap(), 0);

        let all = store.list().unwrap();
        assert_eq!(all[0].shipping_date, Some(first_day));
    }

    #[test]
    fn ship_ignores_unknown_identifiers() {
        let orders = sample_set();
        let store = Arc::new(MemoryStore::with_orders(orders));
        let service = OrderService::new(store.clone());

        let shipped = service
            .ship_on(&[Uuid::new_v4()], NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .unwrap();
        assert_eq!(shipped, 0);
        assert!(store.list().unwrap().iter().all(|o| !o.is_shipped()));
    }
}
