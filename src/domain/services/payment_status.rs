use chrono::NaiveDate;

use crate::domain::models::payment::PaymentStatus;

/// Display status of a payment. Never stored; recomputed from the dates on every read.
///
/// A recorded payment date wins over everything else. An unpaid payment is overdue only once
/// its due date is strictly in the past, so a payment due today is still pending.
pub fn derive_status(due_date: NaiveDate, paid_on: Option<NaiveDate>, today: NaiveDate) -> PaymentStatus {
    if paid_on.is_some() {
        PaymentStatus::Paid
    } else if due_date < today {
        PaymentStatus::Overdue
    } else {
        PaymentStatus::Pending
    }
}
