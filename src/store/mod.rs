mod client_ops;
mod core;
mod metrics;
mod order_ops;
mod search_ops;
mod tour_ops;
mod types;

pub use self::core::AgencyStore;
pub use metrics::{InstrumentedConnection, StoreMetricsSnapshot};
pub use types::{
    Client, ClientOrderRow, Decimal, Order, OrderRecord, OrderWindowRow, SearchOutcome, Tour,
    TourPriceRow,
};
