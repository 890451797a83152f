use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::store::{BookingStore, EngineStore, PaymentStore, RevenueStore, RoomStore};
use crate::types::{
    Booking, BookingId, PaymentId, PaymentObligation, PaymentStatus, RevenueRecord, Room, RoomId,
};

#[derive(Debug, Default)]
struct Inner {
    bookings: HashMap<BookingId, Booking>,
    rooms: HashMap<RoomId, Room>,
    payments: HashMap<PaymentId, PaymentObligation>,
    revenue: Vec<RevenueRecord>,
}

/// in-memory store over one mutex, the test double for the whole port
///
/// every compound operation is atomic because it runs under a single lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }

    /// seed a booking (test/demo setup, not part of the engine port)
    pub fn seed_booking(&self, booking: Booking) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.bookings.insert(booking.id, booking);
        }
    }

    /// seed a room (test/demo setup, not part of the engine port)
    pub fn seed_room(&self, room: Room) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.rooms.insert(room.id, room);
        }
    }

    /// snapshot of the revenue ledger
    pub fn revenue_records(&self) -> Vec<RevenueRecord> {
        self.inner
            .lock()
            .map(|inner| inner.revenue.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn fetch_booking(&self, id: BookingId) -> Result<Option<Booking>, StoreError> {
        Ok(self.lock()?.bookings.get(&id).cloned())
    }

    async fn update_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.bookings.contains_key(&booking.id) {
            return Err(StoreError::new(format!("unknown booking {}", booking.id)));
        }
        inner.bookings.insert(booking.id, booking.clone());
        Ok(())
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn fetch_room(&self, id: RoomId) -> Result<Option<Room>, StoreError> {
        Ok(self.lock()?.rooms.get(&id).cloned())
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn fetch_payment(&self, id: PaymentId) -> Result<Option<PaymentObligation>, StoreError> {
        Ok(self.lock()?.payments.get(&id).cloned())
    }

    async fn insert_payments(&self, rows: &[PaymentObligation]) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        for row in rows {
            inner.payments.insert(row.id, row.clone());
        }
        Ok(())
    }

    async fn update_payment(&self, row: &PaymentObligation) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.payments.contains_key(&row.id) {
            return Err(StoreError::new(format!("unknown payment {}", row.id)));
        }
        inner.payments.insert(row.id, row.clone());
        Ok(())
    }

    async fn payments_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<PaymentObligation>, StoreError> {
        let inner = self.lock()?;
        let mut rows: Vec<PaymentObligation> = inner
            .payments
            .values()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.due_date, p.created_at, p.id));
        Ok(rows)
    }

    async fn list_completed(&self) -> Result<Vec<PaymentObligation>, StoreError> {
        let inner = self.lock()?;
        let mut rows: Vec<PaymentObligation> = inner
            .payments
            .values()
            .filter(|p| p.status == PaymentStatus::Completed)
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.due_date, p.created_at, p.id));
        Ok(rows)
    }
}

#[async_trait]
impl RevenueStore for MemoryStore {
    async fn insert_revenue(&self, record: &RevenueRecord) -> Result<(), StoreError> {
        self.lock()?.revenue.push(record.clone());
        Ok(())
    }

    async fn update_revenue(&self, record: &RevenueRecord) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        match inner.revenue.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::new(format!("unknown revenue row {}", record.id))),
        }
    }

    async fn find_revenue_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Option<RevenueRecord>, StoreError> {
        let inner = self.lock()?;
        // most recent first, matching how corrections look rows up
        Ok(inner
            .revenue
            .iter()
            .rev()
            .find(|r| r.payment_id == Some(payment_id))
            .cloned())
    }

    async fn revenue_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<RevenueRecord>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .revenue
            .iter()
            .filter(|r| r.booking_id == Some(booking_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EngineStore for MemoryStore {
    async fn replace_pending_payments(
        &self,
        booking_id: BookingId,
        rows: &[PaymentObligation],
    ) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        inner
            .payments
            .retain(|_, p| !(p.booking_id == booking_id && p.status == PaymentStatus::Pending));
        for row in rows {
            inner.payments.insert(row.id, row.clone());
        }
        Ok(rows.len())
    }

    async fn complete_payment_with_revenue(
        &self,
        payment: &PaymentObligation,
        record: &RevenueRecord,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.payments.contains_key(&payment.id) {
            return Err(StoreError::new(format!("unknown payment {}", payment.id)));
        }
        inner.payments.insert(payment.id, payment.clone());
        inner.revenue.push(record.clone());
        Ok(())
    }

    async fn refund_deposit_pair(
        &self,
        original: &PaymentObligation,
        refund: &PaymentObligation,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.payments.contains_key(&original.id) {
            return Err(StoreError::new(format!("unknown payment {}", original.id)));
        }
        inner.payments.insert(original.id, original.clone());
        inner.payments.insert(refund.id, refund.clone());
        Ok(())
    }
}
