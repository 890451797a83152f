use thiserror::Error;

use crate::types::{BookingId, PaymentId, PaymentStatus, RoomId};

/// failure inside an external store call, carried verbatim
#[derive(Error, Debug)]
#[error("store operation failed: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("room {room:?} has no usable monthly price")]
    MissingPrice {
        room: Option<RoomId>,
    },

    #[error("invalid stay: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange {
        check_in: chrono::NaiveDate,
        check_out: chrono::NaiveDate,
    },

    #[error("invalid transition on payment {payment_id}: {attempted} from {from:?}")]
    InvalidStateTransition {
        payment_id: PaymentId,
        from: PaymentStatus,
        attempted: &'static str,
    },

    #[error("booking not found: {id}")]
    BookingNotFound {
        id: BookingId,
    },

    #[error("room not found: {id}")]
    RoomNotFound {
        id: RoomId,
    },

    #[error("payment not found: {id}")]
    PaymentNotFound {
        id: PaymentId,
    },

    #[error("booking {booking_id} has no deposit obligation")]
    DepositNotFound {
        booking_id: BookingId,
    },

    #[error("refund of payment {payment_id} requires room-condition notes")]
    EmptyRefundNotes {
        payment_id: PaymentId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
