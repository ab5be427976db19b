use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::domain::services::payment_status::derive_status;
use crate::error::AppError;

pub const MAX_DESCRIPTION_LEN: usize = 255;
pub const MAX_INVOICE_LEN: usize = 50;
const AMOUNT_SCALE: u32 = 2;
const AMOUNT_MAX_DIGITS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Pago")]
    Paid,
    #[serde(rename = "Atrasado")]
    Overdue,
}

#[derive(Debug, Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownStatus(String);

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Paid => "Pago",
            PaymentStatus::Overdue => "Atrasado",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pendente" => Ok(PaymentStatus::Pending),
            "Pago" => Ok(PaymentStatus::Paid),
            "Atrasado" => Ok(PaymentStatus::Overdue),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Monetary value with two decimal places, stored as canonical text (e.g. `"150.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Validates precision (at most 2 decimal places, 10 digits overall) and rescales to 2 places.
    pub fn new(value: Decimal) -> Result<Self, AppError> {
        let normalized = value.normalize();
        if normalized.scale() > AMOUNT_SCALE {
            return Err(AppError::Validation(format!(
                "valor: ensure that there are no more than {} decimal places", AMOUNT_SCALE
            )));
        }
        let limit = Decimal::from(10i64.pow(AMOUNT_MAX_DIGITS - AMOUNT_SCALE));
        if normalized.abs() >= limit {
            return Err(AppError::Validation(format!(
                "valor: ensure that there are no more than {} digits in total", AMOUNT_MAX_DIGITS
            )));
        }
        let mut scaled = normalized;
        scaled.rescale(AMOUNT_SCALE);
        Ok(Self(scaled))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Amount {
    type Error = rust_decimal::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Decimal::from_str(&value).map(Self)
    }
}

/// A payment row, joined with the name of its category (if any).
#[derive(Debug, FromRow, Clone)]
pub struct Payment {
    pub id: i64,
    pub tenant_id: i64,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub amount: Amount,
    pub competency_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub invoice_number: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn status_on(&self, today: NaiveDate) -> PaymentStatus {
        derive_status(self.due_date, self.paid_on, today)
    }
}

/// Writable fields of a payment. The owning tenant is supplied separately by the caller.
#[derive(Debug, Clone)]
pub struct PaymentFields {
    pub description: String,
    pub amount: Amount,
    pub competency_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub invoice_number: Option<String>,
    pub category_id: Option<i64>,
}

impl PaymentFields {
    pub fn validate(&self) -> Result<(), AppError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(AppError::Validation("descricao: this field may not be blank".into()));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(AppError::Validation(format!(
                "descricao: ensure this field has no more than {} characters", MAX_DESCRIPTION_LEN
            )));
        }
        if let Some(invoice) = &self.invoice_number
            && invoice.chars().count() > MAX_INVOICE_LEN {
            return Err(AppError::Validation(format!(
                "numero_nota_fiscal: ensure this field has no more than {} characters", MAX_INVOICE_LEN
            )));
        }
        Ok(())
    }
}

impl From<&Payment> for PaymentFields {
    fn from(payment: &Payment) -> Self {
        Self {
            description: payment.description.clone(),
            amount: payment.amount,
            competency_date: payment.competency_date,
            due_date: payment.due_date,
            paid_on: payment.paid_on,
            status: payment.status,
            invoice_number: payment.invoice_number.clone(),
            category_id: payment.category_id,
        }
    }
}

/// Derived status a listing must match, as of a given day.
#[derive(Debug, Clone, Copy)]
pub struct StatusAsOf {
    pub status: PaymentStatus,
    pub today: NaiveDate,
}

/// Listing filters; every criterion is optional and they combine with AND.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub status: Option<StatusAsOf>,
    pub category_id: Option<i64>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub competency_from: Option<NaiveDate>,
    pub competency_to: Option<NaiveDate>,
    pub description: Option<String>,
}
