use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::models::{
    payment::{Amount, Payment, PaymentStatus},
    user::User,
};

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: i64,
    pub descricao: String,
    pub valor: Amount,
    pub data_competencia: NaiveDate,
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub status_display: PaymentStatus,
    pub numero_nota_fiscal: Option<String>,
    pub categoria: Option<i64>,
    pub categoria_nome: Option<String>,
    pub data_criacao: DateTime<Utc>,
}

impl PaymentResponse {
    pub fn new(payment: Payment, today: NaiveDate) -> Self {
        let status_display = payment.status_on(today);
        Self {
            id: payment.id,
            descricao: payment.description,
            valor: payment.amount,
            data_competencia: payment.competency_date,
            data_vencimento: payment.due_date,
            data_pagamento: payment.paid_on,
            status: payment.status,
            status_display,
            numero_nota_fiscal: payment.invoice_number,
            categoria: payment.category_id,
            categoria_nome: payment.category_name,
            data_criacao: payment.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub cliente_id: Option<i64>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_superuser: user.is_superuser,
            cliente_id: user.tenant_id,
        }
    }
}
