pub mod memory;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::types::{
    Booking, BookingId, PaymentId, PaymentObligation, RevenueRecord, Room, RoomId,
};

pub use memory::MemoryStore;

/// booking records: fetch by id, partial update on edit
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn fetch_booking(&self, id: BookingId) -> Result<Option<Booking>, StoreError>;
    async fn update_booking(&self, booking: &Booking) -> Result<(), StoreError>;
}

/// room records: price table and settlement account, read-only here
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn fetch_room(&self, id: RoomId) -> Result<Option<Room>, StoreError>;
}

/// payment obligations
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn fetch_payment(&self, id: PaymentId) -> Result<Option<PaymentObligation>, StoreError>;
    async fn insert_payments(&self, rows: &[PaymentObligation]) -> Result<(), StoreError>;
    async fn update_payment(&self, row: &PaymentObligation) -> Result<(), StoreError>;
    /// all obligations of one booking, ordered by due date
    async fn payments_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<PaymentObligation>, StoreError>;
    /// every completed obligation across bookings, for the bulk backfill
    async fn list_completed(&self) -> Result<Vec<PaymentObligation>, StoreError>;
}

/// revenue ledger rows
#[async_trait]
pub trait RevenueStore: Send + Sync {
    async fn insert_revenue(&self, record: &RevenueRecord) -> Result<(), StoreError>;
    async fn update_revenue(&self, record: &RevenueRecord) -> Result<(), StoreError>;
    async fn find_revenue_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Option<RevenueRecord>, StoreError>;
    async fn revenue_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<RevenueRecord>, StoreError>;
}

/// complete persistence port of the engine
///
/// The compound operations are the transaction boundaries: each one must
/// apply all of its writes or none of them. A SQL-backed implementation
/// maps each to a single transaction; the in-memory store holds one lock
/// across the whole operation.
#[async_trait]
pub trait EngineStore: BookingStore + RoomStore + PaymentStore + RevenueStore {
    /// delete every pending obligation of the booking and insert the new
    /// schedule in its place; settled rows are never touched
    async fn replace_pending_payments(
        &self,
        booking_id: BookingId,
        rows: &[PaymentObligation],
    ) -> Result<usize, StoreError>;

    /// persist a completed payment together with its ledger mirror
    async fn complete_payment_with_revenue(
        &self,
        payment: &PaymentObligation,
        record: &RevenueRecord,
    ) -> Result<(), StoreError>;

    /// persist a refunded deposit together with its paired refund row
    async fn refund_deposit_pair(
        &self,
        original: &PaymentObligation,
        refund: &PaymentObligation,
    ) -> Result<(), StoreError>;
}
