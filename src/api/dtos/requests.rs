use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::domain::models::{
    category::CategoryFields,
    payment::{Amount, PaymentFields, PaymentFilter, PaymentStatus, StatusAsOf},
};
use crate::error::AppError;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
}

#[derive(Deserialize)]
pub struct PatchCategoryRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub nome: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub descricao: Option<Option<String>>,
}

/// Body of `POST` and `PUT`. Any tenant field the client sends is ignored.
#[derive(Deserialize)]
pub struct PaymentRequest {
    pub descricao: String,
    pub valor: Decimal,
    pub data_competencia: NaiveDate,
    pub data_vencimento: NaiveDate,
    #[serde(default)]
    pub data_pagamento: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub numero_nota_fiscal: Option<String>,
    #[serde(default)]
    pub categoria: Option<i64>,
}

#[derive(Deserialize)]
pub struct PatchPaymentRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub descricao: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub valor: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub data_competencia: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub data_vencimento: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub data_pagamento: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<PaymentStatus>>,
    #[serde(default, deserialize_with = "nullable")]
    pub numero_nota_fiscal: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub categoria: Option<Option<i64>>,
}

/// A present field of a PATCH body that must not be cleared: `null` is a validation error.
fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{}: this field may not be null", field)))
}

/// Blank invoice numbers are stored as absent.
fn normalize_invoice(invoice: Option<String>) -> Option<String> {
    invoice
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CategoryRequest {
    pub fn into_fields(self) -> CategoryFields {
        CategoryFields { name: self.nome, description: self.descricao }
    }
}

impl PatchCategoryRequest {
    pub fn apply(self, fields: &mut CategoryFields) -> Result<(), AppError> {
        if let Some(name) = self.nome {
            fields.name = required("nome", name)?;
        }
        if let Some(description) = self.descricao {
            fields.description = description;
        }
        Ok(())
    }
}

impl PaymentRequest {
    pub fn into_fields(self) -> Result<PaymentFields, AppError> {
        Ok(PaymentFields {
            description: self.descricao,
            amount: Amount::new(self.valor)?,
            competency_date: self.data_competencia,
            due_date: self.data_vencimento,
            paid_on: self.data_pagamento,
            status: self.status.unwrap_or(PaymentStatus::Pending),
            invoice_number: normalize_invoice(self.numero_nota_fiscal),
            category_id: self.categoria,
        })
    }
}

impl PatchPaymentRequest {
    pub fn apply(self, fields: &mut PaymentFields) -> Result<(), AppError> {
        if let Some(description) = self.descricao {
            fields.description = required("descricao", description)?;
        }
        if let Some(valor) = self.valor {
            fields.amount = Amount::new(required("valor", valor)?)?;
        }
        if let Some(date) = self.data_competencia {
            fields.competency_date = required("data_competencia", date)?;
        }
        if let Some(date) = self.data_vencimento {
            fields.due_date = required("data_vencimento", date)?;
        }
        if let Some(paid_on) = self.data_pagamento {
            fields.paid_on = paid_on;
        }
        if let Some(status) = self.status {
            fields.status = required("status", status)?;
        }
        if let Some(invoice) = self.numero_nota_fiscal {
            fields.invoice_number = normalize_invoice(invoice);
        }
        if let Some(category_id) = self.categoria {
            fields.category_id = category_id;
        }
        Ok(())
    }
}

#[derive(Deserialize, Default)]
pub struct PaymentListQuery {
    pub status: Option<String>,
    pub categoria: Option<i64>,
    pub data_vencimento_inicio: Option<NaiveDate>,
    pub data_vencimento_fim: Option<NaiveDate>,
    pub data_competencia_inicio: Option<NaiveDate>,
    pub data_competencia_fim: Option<NaiveDate>,
    pub descricao: Option<String>,
}

impl PaymentListQuery {
    /// `today` anchors the derived-status criterion.
    pub fn into_filter(self, today: NaiveDate) -> Result<PaymentFilter, AppError> {
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let status = raw.parse::<PaymentStatus>()
                    .map_err(|_| AppError::Validation(format!("status: \"{}\" is not a valid choice", raw)))?;
                Some(StatusAsOf { status, today })
            }
            None => None,
        };

        Ok(PaymentFilter {
            status,
            category_id: self.categoria,
            due_from: self.data_vencimento_inicio,
            due_to: self.data_vencimento_fim,
            competency_from: self.data_competencia_inicio,
            competency_to: self.data_competencia_fim,
            description: self.descricao.filter(|d| !d.trim().is_empty()),
        })
    }
}
