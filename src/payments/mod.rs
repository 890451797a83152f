pub mod lifecycle;
pub mod schedule;

pub use lifecycle::{apply_update, mark_paid, refund_deposit};
pub use schedule::{build_schedule, ScheduleParams};
