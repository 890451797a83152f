use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a booking
pub type BookingId = Uuid;
/// unique identifier for a payment obligation
pub type PaymentId = Uuid;
/// unique identifier for a room
pub type RoomId = Uuid;
/// unique identifier for a guest
pub type GuestId = Uuid;
/// unique identifier for a settlement bank account
pub type BankAccountId = Uuid;
/// unique identifier for a revenue ledger entry
pub type RevenueId = Uuid;

/// how a booking is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    Monthly,
    Biweekly,
    /// total entered by hand, calculator output is advisory only
    Manual,
}

/// booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Completed,
    Cancelled,
    NoShow,
}

/// kind of payment obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// refundable security hold, at most one per booking
    Deposit,
    /// rent installment on the 30-day grid
    Monthly,
    /// synthetic row pairing a refunded deposit, always negative
    DepositRefund,
}

/// payment obligation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
}

/// whether an obligation moves money in or out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDirection {
    Charge,
    Refund,
}

/// how a payment was settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    Card,
    Other(String),
}

/// pricing rule that produced a quote total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    Daily,
    Biweekly,
    Monthly,
}

/// room price table, as stored on the room record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceTable {
    pub daily_price: Option<Money>,
    pub biweekly_price: Option<Money>,
    pub monthly_price: Option<Money>,
}

/// a reservation of one room by one guest
///
/// invariant: check_out > check_in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub guest_id: GuestId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: Money,
    pub billing_mode: BillingMode,
    pub status: BookingStatus,
}

/// room fields the engine consumes: price table and settlement account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub number: String,
    pub prices: PriceTable,
    pub bank_account_id: Option<BankAccountId>,
}

/// one discrete amount owed or refunded against a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentObligation {
    pub id: PaymentId,
    pub booking_id: BookingId,
    /// signed: negative for refund rows, matching direction
    pub amount: Money,
    pub direction: PaymentDirection,
    pub due_date: NaiveDate,
    pub paid_at: Option<NaiveDate>,
    pub kind: PaymentKind,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub bank_account_id: Option<BankAccountId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentObligation {
    /// completed rows must carry the date the money moved
    pub fn is_settled(&self) -> bool {
        matches!(self.status, PaymentStatus::Completed | PaymentStatus::Refunded)
    }
}

/// append-style ledger entry mirroring a completed payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub id: RevenueId,
    /// explicit link to the mirrored obligation; None only for legacy or
    /// non-booking revenue rows
    pub payment_id: Option<PaymentId>,
    pub booking_id: Option<BookingId>,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub method: PaymentMethod,
    pub bank_account_id: Option<BankAccountId>,
}

/// administrative correction of a settled payment; every field is
/// independently settable and overwrites the stored value directly
#[derive(Debug, Clone, Default)]
pub struct PaymentUpdate {
    pub amount: Option<Money>,
    pub status: Option<PaymentStatus>,
    pub paid_at: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub bank_account_id: Option<BankAccountId>,
}

/// deposit position of a booking, for the stats summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// no deposit obligation exists on the booking
    NotRequired,
    Pending,
    Paid,
    Refunded,
}

/// aggregate payment position of one booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingStats {
    /// sum of all charge obligations (deposit + installments)
    pub total: Money,
    /// sum of completed charge obligations
    pub paid: Money,
    /// sum of still-pending obligations
    pub pending: Money,
    pub deposit_status: DepositStatus,
}
