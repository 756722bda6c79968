use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shipping lifecycle of an order. The transition is one-way:
/// unshipped orders can be shipped, shipped orders stay shipped.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum ShippingStatus {
    #[serde(rename = "未出荷")]
    #[strum(serialize = "unshipped")]
    Unshipped,

    #[serde(rename = "出荷済")]
    #[strum(serialize = "shipped")]
    Shipped,
}

impl ShippingStatus {
    /// Label shown to the operator and stored on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unshipped => "未出荷",
            Self::Shipped => "出荷済",
        }
    }
}

/// One sales order as persisted in the order collection.
///
/// The wire format mirrors the stored collection this tool manages:
/// camelCase keys, `YYYY-MM-DD` date strings with `""` for an absent
/// date, and the Japanese status labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Primary key, assigned at normalization time.
    pub id: Uuid,

    /// External business key, expected unique across the collection.
    pub order_number: String,

    pub order_date: NaiveDate,

    pub customer_code: String,
    pub customer_name: String,

    pub product_code: String,
    pub product_name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(with = "blank_date")]
    pub delivery_date: Option<NaiveDate>,
    pub delivery_address: String,
    pub delivery_phone: String,

    pub shipping_status: ShippingStatus,

    /// Set exactly once, when the order transitions to shipped.
    #[serde(with = "blank_date")]
    pub shipping_date: Option<NaiveDate>,

    pub remarks: String,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Marks the order shipped as of `date`.
    ///
    /// Returns `false` without touching the record when it is already
    /// shipped, so repeating the instruction is a no-op.
    pub fn ship(&mut self, date: NaiveDate) -> bool {
        if self.shipping_status == ShippingStatus::Shipped {
            return false;
        }
        self.shipping_status = ShippingStatus::Shipped;
        self.shipping_date = Some(date);
        true
    }

    pub fn is_shipped(&self) -> bool {
        self.shipping_status == ShippingStatus::Shipped
    }
}

/// Serde adapter for optional dates stored as `"YYYY-MM-DD"` or `""`.
mod blank_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(D::Error::custom)
    }
}
