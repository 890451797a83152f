use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{BookingId, PaymentId, PaymentMethod, RevenueId};

/// all events that can be emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // schedule events
    ScheduleGenerated {
        booking_id: BookingId,
        obligation_count: usize,
        deposit_included: bool,
        anchor_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    ScheduleRegenerated {
        booking_id: BookingId,
        removed_pending: usize,
        created: usize,
        timestamp: DateTime<Utc>,
    },
    BookingAmountAdjusted {
        booking_id: BookingId,
        old_total: Money,
        new_total: Money,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentCompleted {
        payment_id: PaymentId,
        booking_id: BookingId,
        amount: Money,
        paid_at: NaiveDate,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    },
    DepositRefunded {
        booking_id: BookingId,
        deposit_id: PaymentId,
        refund_id: PaymentId,
        amount: Money,
        refund_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    PaymentUpdated {
        payment_id: PaymentId,
        booking_id: BookingId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    // ledger events
    RevenueRecorded {
        revenue_id: RevenueId,
        payment_id: PaymentId,
        amount: Money,
        category: String,
        timestamp: DateTime<Utc>,
    },
    RevenueSynced {
        created: usize,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
