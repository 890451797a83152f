use std::sync::Arc;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::events::{Event, EventStore};
use crate::payments::lifecycle;
use crate::payments::schedule::{build_schedule, ScheduleParams};
use crate::pricing::{compute_pricing, PriceQuote};
use crate::revenue::{build_revenue_record, matches_payment};
use crate::store::EngineStore;
use crate::types::{
    BankAccountId, Booking, BookingId, BookingStats, DepositStatus, PaymentId, PaymentKind,
    PaymentMethod, PaymentObligation, PaymentStatus, PaymentUpdate, PriceTable, Room, RoomId,
};

/// booking payment engine: pricing, scheduling, payment lifecycle and the
/// revenue ledger, over an injected store
///
/// single-writer-per-booking is assumed; operations await their store
/// calls in sequence and never retry
pub struct BillingEngine<S: EngineStore> {
    store: Arc<S>,
    config: BillingConfig,
    pub events: EventStore,
}

impl<S: EngineStore> BillingEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, BillingConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: BillingConfig) -> Self {
        Self {
            store,
            config,
            events: EventStore::new(),
        }
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// drain the audit events collected by the operations so far
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// price a stay; advisory only, callers override under manual billing
    pub fn compute_pricing(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        prices: &PriceTable,
    ) -> Result<PriceQuote> {
        compute_pricing(check_in, check_out, prices)
    }

    /// generate the initial payment schedule for a booking
    ///
    /// Additive: existing obligations are never inspected or removed, so
    /// this must run once per booking; terms changes go through
    /// [`regenerate_schedule`](Self::regenerate_schedule).
    pub async fn generate_schedule(
        &mut self,
        booking_id: BookingId,
        installment_amount: Money,
        installment_count: u32,
        anchor_date: NaiveDate,
        include_deposit: bool,
        deposit_amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<usize> {
        let booking = self.load_booking(booking_id).await?;
        let room = self.load_room(booking.room_id).await?;

        let rows = self.build_rows(
            &booking,
            &room,
            installment_amount,
            installment_count,
            anchor_date,
            include_deposit.then_some(deposit_amount),
            time,
        );
        self.store.insert_payments(&rows).await?;

        info!(
            booking = %booking_id,
            count = rows.len(),
            deposit = include_deposit,
            "payment schedule generated"
        );
        self.events.emit(Event::ScheduleGenerated {
            booking_id,
            obligation_count: rows.len(),
            deposit_included: rows.iter().any(|r| r.kind == PaymentKind::Deposit),
            anchor_date,
            timestamp: time.now(),
        });

        Ok(rows.len())
    }

    /// mark a pending obligation as paid and mirror it into the ledger
    ///
    /// the status update and the revenue insert are one atomic store call
    pub async fn mark_paid(
        &mut self,
        payment_id: PaymentId,
        paid_date: NaiveDate,
        method: PaymentMethod,
        notes: Option<String>,
        bank_account_id: Option<BankAccountId>,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        let mut payment = self.load_payment(payment_id).await?;
        lifecycle::mark_paid(&mut payment, paid_date, method, notes, bank_account_id)?;

        let booking = self.load_booking(payment.booking_id).await?;
        let room = self.load_room(booking.room_id).await?;
        let record = build_revenue_record(&payment, &booking, &room, &self.config);

        self.store
            .complete_payment_with_revenue(&payment, &record)
            .await?;

        info!(payment = %payment_id, amount = %payment.amount, "payment marked paid");
        self.events.emit(Event::PaymentCompleted {
            payment_id,
            booking_id: payment.booking_id,
            amount: payment.amount,
            paid_at: paid_date,
            method: payment.method.clone(),
            timestamp: time.now(),
        });
        self.events.emit(Event::RevenueRecorded {
            revenue_id: record.id,
            payment_id,
            amount: record.amount,
            category: record.category.clone(),
            timestamp: time.now(),
        });

        Ok(())
    }

    /// refund a booking's deposit
    ///
    /// the original deposit row becomes refunded and a paired
    /// deposit-refund row (negated amount, completed) is inserted in the
    /// same atomic store call; the refund row itself is the negative
    /// reporting line, no ledger record is written for it
    pub async fn refund_deposit(
        &mut self,
        booking_id: BookingId,
        refund_date: NaiveDate,
        method: PaymentMethod,
        notes: String,
        time: &SafeTimeProvider,
    ) -> Result<PaymentId> {
        let payments = self.store.payments_for_booking(booking_id).await?;
        let mut deposit = payments
            .into_iter()
            .find(|p| p.kind == PaymentKind::Deposit)
            .ok_or(EngineError::DepositNotFound { booking_id })?;

        let refund =
            lifecycle::refund_deposit(&mut deposit, refund_date, method, notes, time.now())?;
        self.store.refund_deposit_pair(&deposit, &refund).await?;

        info!(booking = %booking_id, amount = %refund.amount, "deposit refunded");
        self.events.emit(Event::DepositRefunded {
            booking_id,
            deposit_id: deposit.id,
            refund_id: refund.id,
            amount: refund.amount,
            refund_date,
            timestamp: time.now(),
        });

        Ok(refund.id)
    }

    /// reconcile a changed booking against its existing schedule
    ///
    /// Pending obligations are replaced by a freshly built schedule from
    /// the new terms; completed and refunded rows are immutable history.
    /// When nothing is pending any more the booking total is adjusted
    /// directly instead — a deliberate fallback, not an error.
    pub async fn regenerate_schedule(
        &mut self,
        booking_id: BookingId,
        installment_amount: Money,
        installment_count: u32,
        anchor_date: NaiveDate,
        deposit_amount: Option<Money>,
        time: &SafeTimeProvider,
    ) -> Result<usize> {
        let mut booking = self.load_booking(booking_id).await?;
        let payments = self.store.payments_for_booking(booking_id).await?;
        let pending_count = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Pending)
            .count();

        if pending_count == 0 {
            let new_total = installment_amount * Decimal::from(installment_count);
            let old_total = booking.total_amount;
            booking.total_amount = new_total;
            self.store.update_booking(&booking).await?;

            warn!(
                booking = %booking_id,
                %old_total,
                %new_total,
                "no pending obligations left, adjusted booking total instead of regenerating"
            );
            self.events.emit(Event::BookingAmountAdjusted {
                booking_id,
                old_total,
                new_total,
                timestamp: time.now(),
            });
            return Ok(0);
        }

        let room = self.load_room(booking.room_id).await?;
        let rows = self.build_rows(
            &booking,
            &room,
            installment_amount,
            installment_count,
            anchor_date,
            deposit_amount,
            time,
        );
        let created = self
            .store
            .replace_pending_payments(booking_id, &rows)
            .await?;

        info!(
            booking = %booking_id,
            removed = pending_count,
            created,
            "payment schedule regenerated"
        );
        self.events.emit(Event::ScheduleRegenerated {
            booking_id,
            removed_pending: pending_count,
            created,
            timestamp: time.now(),
        });

        Ok(created)
    }

    /// correct a settled payment after the fact and keep the ledger in step
    ///
    /// the matching ledger row is found through the payment link; when none
    /// exists and the corrected status is completed, one is created instead
    pub async fn update_payment(
        &mut self,
        payment_id: PaymentId,
        update: PaymentUpdate,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        let mut payment = self.load_payment(payment_id).await?;
        lifecycle::apply_update(&mut payment, &update);
        self.store.update_payment(&payment).await?;

        match self.store.find_revenue_for_payment(payment_id).await? {
            Some(mut record) => {
                record.amount = payment.amount;
                record.date = payment.paid_at.unwrap_or(payment.due_date);
                record.method = payment.method.clone();
                record.bank_account_id = payment.bank_account_id;
                self.store.update_revenue(&record).await?;
            }
            None if payment.status == PaymentStatus::Completed => {
                let booking = self.load_booking(payment.booking_id).await?;
                let room = self.load_room(booking.room_id).await?;
                let record = build_revenue_record(&payment, &booking, &room, &self.config);
                self.store.insert_revenue(&record).await?;
                self.events.emit(Event::RevenueRecorded {
                    revenue_id: record.id,
                    payment_id,
                    amount: record.amount,
                    category: record.category.clone(),
                    timestamp: time.now(),
                });
            }
            None => {}
        }

        info!(payment = %payment_id, "payment corrected");
        self.events.emit(Event::PaymentUpdated {
            payment_id,
            booking_id: payment.booking_id,
            amount: payment.amount,
            timestamp: time.now(),
        });

        Ok(())
    }

    /// bulk backfill: mirror every completed payment that has no ledger row
    ///
    /// Idempotent: payments already linked, or matched by the legacy
    /// booking + amount + date heuristic, are skipped silently. Refund
    /// rows are never mirrored. A second run creates nothing.
    pub async fn sync_revenue(&mut self, time: &SafeTimeProvider) -> Result<usize> {
        let completed = self.store.list_completed().await?;
        let mut created = 0usize;

        for payment in completed {
            if payment.kind == PaymentKind::DepositRefund {
                continue;
            }
            if self
                .store
                .find_revenue_for_payment(payment.id)
                .await?
                .is_some()
            {
                continue;
            }
            let existing = self.store.revenue_for_booking(payment.booking_id).await?;
            if existing
                .iter()
                .any(|r| matches_payment(r, &payment, &self.config))
            {
                continue;
            }

            let booking = self.load_booking(payment.booking_id).await?;
            let room = self.load_room(booking.room_id).await?;
            let record = build_revenue_record(&payment, &booking, &room, &self.config);
            self.store.insert_revenue(&record).await?;
            self.events.emit(Event::RevenueRecorded {
                revenue_id: record.id,
                payment_id: payment.id,
                amount: record.amount,
                category: record.category.clone(),
                timestamp: time.now(),
            });
            created += 1;
        }

        info!(created, "revenue ledger backfill finished");
        self.events.emit(Event::RevenueSynced {
            created,
            timestamp: time.now(),
        });

        Ok(created)
    }

    /// aggregate payment position of one booking
    pub async fn booking_stats(&self, booking_id: BookingId) -> Result<BookingStats> {
        self.load_booking(booking_id).await?;
        let payments = self.store.payments_for_booking(booking_id).await?;

        let mut total = Money::ZERO;
        let mut paid = Money::ZERO;
        let mut pending = Money::ZERO;
        let mut deposit_status = DepositStatus::NotRequired;

        for payment in &payments {
            match payment.kind {
                PaymentKind::DepositRefund => continue,
                PaymentKind::Deposit => {
                    deposit_status = match payment.status {
                        PaymentStatus::Pending => DepositStatus::Pending,
                        PaymentStatus::Completed => DepositStatus::Paid,
                        PaymentStatus::Refunded => DepositStatus::Refunded,
                    };
                }
                PaymentKind::Monthly => {}
            }
            total += payment.amount;
            match payment.status {
                PaymentStatus::Pending => pending += payment.amount,
                PaymentStatus::Completed => paid += payment.amount,
                PaymentStatus::Refunded => {}
            }
        }

        Ok(BookingStats {
            total,
            paid,
            pending,
            deposit_status,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_rows(
        &self,
        booking: &Booking,
        room: &Room,
        installment_amount: Money,
        installment_count: u32,
        anchor_date: NaiveDate,
        deposit_amount: Option<Money>,
        time: &SafeTimeProvider,
    ) -> Vec<PaymentObligation> {
        let params = ScheduleParams {
            booking_id: booking.id,
            installment_amount,
            installment_count,
            anchor_date,
            deposit_amount,
            bank_account_id: room.bank_account_id,
            method: self.config.default_method.clone(),
            interval_days: self.config.installment_interval_days,
        };
        build_schedule(&params, time.now())
    }

    async fn load_booking(&self, id: BookingId) -> Result<Booking> {
        self.store
            .fetch_booking(id)
            .await?
            .ok_or(EngineError::BookingNotFound { id })
    }

    async fn load_room(&self, id: RoomId) -> Result<Room> {
        self.store
            .fetch_room(id)
            .await?
            .ok_or(EngineError::RoomNotFound { id })
    }

    async fn load_payment(&self, id: PaymentId) -> Result<PaymentObligation> {
        self.store
            .fetch_payment(id)
            .await?
            .ok_or(EngineError::PaymentNotFound { id })
    }
}
