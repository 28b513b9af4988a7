use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_NAME: &str = "test item";
pub const DEFAULT_DESCRIPTION: &str = "blah blah blah";
pub const DEFAULT_IMAGE_URL: &str =
    "https://i1.wp.com/gelatologia.com/wp-content/uploads/2020/07/placeholder.png";
pub const DEFAULT_QUANTITY: i32 = 1;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned by the store
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Stock keeping unit, not unique
    pub sku: Option<i64>,
    /// Image URL
    pub image: Option<String>,
    pub quantity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a create payload, stamping `created_at` now when absent.
    pub fn from_create(id: i32, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            sku: input.sku,
            image: input.image,
            quantity: input.quantity,
            created_at: input.created_at.unwrap_or_else(Utc::now),
        }
    }

    /// Apply the fields present in `update`; absent fields are left untouched.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(created_at) = update.created_at {
            self.created_at = created_at;
        }
    }
}

/// DTO for creating a product; every field is optional on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateProduct {
    #[serde(default = "default_name")]
    #[schema(default = "test item")]
    pub name: String,

    #[serde(default = "default_description")]
    #[schema(default = "blah blah blah")]
    pub description: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub sku: Option<i64>,

    #[serde(default = "default_image")]
    pub image: Option<String>,

    #[serde(default = "default_quantity")]
    #[schema(default = 1)]
    pub quantity: Option<i32>,

    /// Defaults to the time the product is stored
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for CreateProduct {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            price: 0.0,
            sku: None,
            image: default_image(),
            quantity: default_quantity(),
            created_at: None,
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_image() -> Option<String> {
    Some(DEFAULT_IMAGE_URL.to_string())
}

fn default_quantity() -> Option<i32> {
    Some(DEFAULT_QUANTITY)
}

/// DTO for a partial update.
///
/// Only keys present in the request body change the product. For `sku`,
/// `image` and `quantity` an explicit `null` clears the stored value; for the
/// other fields `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub sku: Option<Option<i64>>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<Option<i32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// A present key, even `null`, becomes `Some(..)`; a missing key falls back to `default`.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Creation-date window for listing products. Both bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Lower bound: RFC 3339 timestamp, naive date-time (UTC) or date
    #[serde(default, deserialize_with = "deserialize_date_bound")]
    #[param(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub start_date: Option<DateTime<Utc>>,

    /// Upper bound: RFC 3339 timestamp, naive date-time (UTC) or date
    #[serde(default, deserialize_with = "deserialize_date_bound")]
    #[param(value_type = Option<String>, example = "2024-12-31T23:59:59Z")]
    pub end_date: Option<DateTime<Utc>>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.start_date.is_none_or(|start| product.created_at >= start)
            && self.end_date.is_none_or(|end| product.created_at <= end)
    }
}

fn deserialize_date_bound<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid datetime `{raw}`"))),
        None => Ok(None),
    }
}

/// Parse an RFC 3339 timestamp, a naive ISO-8601 date-time (taken as UTC) or
/// a plain date (midnight UTC).
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Query accepted by `GET /products/{id}`. `q` is accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadProductQuery {
    /// Free-form query string, currently unused
    pub q: Option<String>,
}
