use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{
    BankAccountId, BookingId, PaymentDirection, PaymentKind, PaymentMethod, PaymentObligation,
    PaymentStatus,
};

/// inputs for one schedule generation pass
#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub booking_id: BookingId,
    pub installment_amount: Money,
    pub installment_count: u32,
    /// check-in date, base for every due date in the schedule
    pub anchor_date: NaiveDate,
    /// emit a deposit obligation due on the anchor when positive
    pub deposit_amount: Option<Money>,
    /// settlement account inherited from the room
    pub bank_account_id: Option<BankAccountId>,
    pub method: PaymentMethod,
    /// fixed spacing between installments
    pub interval_days: i64,
}

/// build a fresh schedule of pending obligations
///
/// Additive: never inspects existing rows. An optional deposit due on the
/// anchor, then `installment_count` installments at `anchor + interval·i`
/// (i = 0..count-1), all pending with the supplied method and account.
pub fn build_schedule(params: &ScheduleParams, now: DateTime<Utc>) -> Vec<PaymentObligation> {
    let mut obligations = Vec::with_capacity(params.installment_count as usize + 1);

    if let Some(deposit) = params.deposit_amount.filter(|d| d.is_positive()) {
        obligations.push(PaymentObligation {
            id: Uuid::new_v4(),
            booking_id: params.booking_id,
            amount: deposit,
            direction: PaymentDirection::Charge,
            due_date: params.anchor_date,
            paid_at: None,
            kind: PaymentKind::Deposit,
            status: PaymentStatus::Pending,
            method: params.method.clone(),
            bank_account_id: params.bank_account_id,
            notes: None,
            created_at: now,
        });
    }

    for i in 0..params.installment_count {
        obligations.push(PaymentObligation {
            id: Uuid::new_v4(),
            booking_id: params.booking_id,
            amount: params.installment_amount,
            direction: PaymentDirection::Charge,
            due_date: params.anchor_date + Duration::days(params.interval_days * i as i64),
            paid_at: None,
            kind: PaymentKind::Monthly,
            status: PaymentStatus::Pending,
            method: params.method.clone(),
            bank_account_id: params.bank_account_id,
            notes: None,
            created_at: now,
        });
    }

    obligations
}
