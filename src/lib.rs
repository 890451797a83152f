pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod payments;
pub mod pricing;
pub mod revenue;
pub mod store;
pub mod types;

// re-export key types
pub use config::BillingConfig;
pub use decimal::Money;
pub use engine::BillingEngine;
pub use errors::{EngineError, Result, StoreError};
pub use events::{Event, EventStore};
pub use payments::{build_schedule, ScheduleParams};
pub use pricing::{compute_pricing, PriceQuote};
pub use store::{
    BookingStore, EngineStore, MemoryStore, PaymentStore, RevenueStore, RoomStore,
};
pub use types::{
    BankAccountId, BillingMode, Booking, BookingId, BookingStats, BookingStatus, DepositStatus,
    GuestId, PaymentDirection, PaymentId, PaymentKind, PaymentMethod, PaymentObligation,
    PaymentStatus, PaymentUpdate, PriceTable, PriceType, RevenueId, RevenueRecord, Room, RoomId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
