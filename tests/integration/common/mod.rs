//! Shared fixture entities

use activebase::registry::Registry;
use activebase::session::MemorySession;
use activebase::{Record, Status};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Default, Record)]
#[table_name = "customers"]
pub struct Customer {
    #[primary_key]
    pub id: Option<i64>,
    pub active: Status,
    #[unique]
    pub email: String,
    pub password: String,
    #[protected]
    pub api_token: Option<String>,
    pub joined_on: Option<NaiveDate>,
    #[has_many]
    pub orders: Vec<Order>,
    #[has_one]
    pub profile: Option<Profile>,
}

#[derive(Debug, Default, Record)]
#[table_name = "orders"]
pub struct Order {
    #[primary_key]
    pub id: Option<i64>,
    pub active: Status,
    pub total: f64,
    pub customer_id: Option<i64>,
    pub placed_at: Option<NaiveDateTime>,
    #[has_many]
    pub lines: Vec<OrderLine>,
    #[belongs_to]
    pub customer: Option<Customer>,
}

#[derive(Debug, Default, Record)]
#[table_name = "order_lines"]
pub struct OrderLine {
    #[primary_key]
    pub id: Option<i64>,
    pub active: Status,
    pub sku: String,
    pub quantity: i32,
}

#[derive(Debug, Default, Record)]
#[table_name = "profiles"]
pub struct Profile {
    #[primary_key]
    pub id: Option<i64>,
    pub active: Status,
    pub bio: String,
}

pub fn registry() -> Registry {
    Registry::new()
        .register::<Customer>()
        .register::<Order>()
        .register::<OrderLine>()
        .register::<Profile>()
}

/// A session with storage for every fixture entity
pub fn session() -> MemorySession {
    let session = MemorySession::new();
    registry()
        .create_all(&session)
        .expect("create fixture tables");
    session
}

pub fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid timestamp")
}
