use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::{EngineError, Result};
use crate::types::{
    BankAccountId, PaymentDirection, PaymentKind, PaymentMethod, PaymentObligation, PaymentStatus,
    PaymentUpdate,
};

/// mark a pending obligation as paid
///
/// pending → completed, sets paid_at; any other source status is rejected
pub fn mark_paid(
    obligation: &mut PaymentObligation,
    paid_date: NaiveDate,
    method: PaymentMethod,
    notes: Option<String>,
    bank_account_id: Option<BankAccountId>,
) -> Result<()> {
    if obligation.status != PaymentStatus::Pending {
        return Err(EngineError::InvalidStateTransition {
            payment_id: obligation.id,
            from: obligation.status,
            attempted: "mark_paid",
        });
    }

    obligation.status = PaymentStatus::Completed;
    obligation.paid_at = Some(paid_date);
    obligation.method = method;
    if notes.is_some() {
        obligation.notes = notes;
    }
    if bank_account_id.is_some() {
        obligation.bank_account_id = bank_account_id;
    }

    Ok(())
}

/// refund a pending deposit
///
/// The original row becomes refunded and stays in place; the returned
/// deposit-refund row carries the negated amount, completed status and the
/// refund date, and is what reporting reads as money leaving. Notes
/// describing the room condition are mandatory.
pub fn refund_deposit(
    deposit: &mut PaymentObligation,
    refund_date: NaiveDate,
    method: PaymentMethod,
    notes: String,
    now: DateTime<Utc>,
) -> Result<PaymentObligation> {
    if deposit.kind != PaymentKind::Deposit {
        return Err(EngineError::InvalidStateTransition {
            payment_id: deposit.id,
            from: deposit.status,
            attempted: "refund_non_deposit",
        });
    }
    if deposit.status != PaymentStatus::Pending {
        return Err(EngineError::InvalidStateTransition {
            payment_id: deposit.id,
            from: deposit.status,
            attempted: "refund_deposit",
        });
    }
    if notes.trim().is_empty() {
        return Err(EngineError::EmptyRefundNotes {
            payment_id: deposit.id,
        });
    }

    deposit.status = PaymentStatus::Refunded;
    deposit.paid_at = Some(refund_date);
    deposit.notes = Some(notes.clone());

    Ok(PaymentObligation {
        id: Uuid::new_v4(),
        booking_id: deposit.booking_id,
        amount: -deposit.amount,
        direction: PaymentDirection::Refund,
        due_date: refund_date,
        paid_at: Some(refund_date),
        kind: PaymentKind::DepositRefund,
        status: PaymentStatus::Completed,
        method,
        bank_account_id: deposit.bank_account_id,
        notes: Some(notes),
        created_at: now,
    })
}

/// overwrite settled-payment fields after the fact
///
/// administrative correction, not a transition: each supplied field
/// replaces the stored value independently
pub fn apply_update(obligation: &mut PaymentObligation, update: &PaymentUpdate) {
    if let Some(amount) = update.amount {
        obligation.amount = amount;
    }
    if let Some(status) = update.status {
        obligation.status = status;
    }
    if let Some(paid_at) = update.paid_at {
        obligation.paid_at = Some(paid_at);
    }
    if let Some(method) = &update.method {
        obligation.method = method.clone();
    }
    if let Some(notes) = &update.notes {
        obligation.notes = Some(notes.clone());
    }
    if let Some(account) = update.bank_account_id {
        obligation.bank_account_id = Some(account);
    }
}
