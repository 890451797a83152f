use uuid::Uuid;

use crate::config::BillingConfig;
use crate::types::{Booking, PaymentObligation, RevenueRecord, Room};

/// build the ledger entry mirroring a completed payment
///
/// category follows the obligation kind and the description embeds the
/// booking reference plus the room's name and number, the way reporting
/// displays ledger lines
pub fn build_revenue_record(
    payment: &PaymentObligation,
    booking: &Booking,
    room: &Room,
    config: &BillingConfig,
) -> RevenueRecord {
    RevenueRecord {
        id: Uuid::new_v4(),
        payment_id: Some(payment.id),
        booking_id: Some(booking.id),
        amount: payment.amount,
        date: payment.paid_at.unwrap_or(payment.due_date),
        category: config.category_for(payment.kind).to_string(),
        description: describe(payment, booking, room, config),
        method: payment.method.clone(),
        bank_account_id: payment.bank_account_id,
    }
}

fn describe(
    payment: &PaymentObligation,
    booking: &Booking,
    room: &Room,
    config: &BillingConfig,
) -> String {
    let reference = short_reference(booking);
    format!(
        "{} - booking {} - {} (room {})",
        config.category_for(payment.kind),
        reference,
        room.name,
        room.number,
    )
}

/// first id segment, the reference shown to admins
fn short_reference(booking: &Booking) -> String {
    booking
        .id
        .to_string()
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// legacy heuristic used only by the bulk backfill: records written before
/// the payment link existed are matched on booking, amount within
/// tolerance, and date
pub fn matches_payment(
    record: &RevenueRecord,
    payment: &PaymentObligation,
    config: &BillingConfig,
) -> bool {
    if record.payment_id == Some(payment.id) {
        return true;
    }
    if record.payment_id.is_some() {
        return false;
    }
    let same_booking = record.booking_id == Some(payment.booking_id);
    let same_date = payment.paid_at.map(|d| d == record.date).unwrap_or(false);
    let close_amount =
        (record.amount - payment.amount).abs() <= config.revenue_match_tolerance;
    same_booking && same_date && close_amount
}
