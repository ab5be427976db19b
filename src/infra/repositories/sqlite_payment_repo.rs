use crate::domain::{
    models::{
        payment::{Payment, PaymentFields, PaymentFilter, PaymentStatus},
        tenant::TenantScope,
    },
    ports::PaymentRepository,
};
use crate::error::AppError;
use super::contains_pattern;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_PAYMENT: &str = "SELECT p.id, p.tenant_id, p.description, p.amount, p.competency_date, \
     p.due_date, p.paid_on, p.status, p.invoice_number, p.category_id, c.name AS category_name, \
     p.created_at FROM payments p LEFT JOIN categories c ON c.id = p.category_id";

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepo {
    async fn create(&self, scope: TenantScope, fields: &PaymentFields) -> Result<Payment, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO payments (tenant_id, description, amount, competency_date, due_date, paid_on, status, \
             invoice_number, category_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id"
        )
            .bind(scope.id())
            .bind(fields.description.trim())
            .bind(fields.amount.to_string())
            .bind(fields.competency_date)
            .bind(fields.due_date)
            .bind(fields.paid_on)
            .bind(fields.status.as_str())
            .bind(&fields.invoice_number)
            .bind(fields.category_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        self.find_by_id(scope, id).await?.ok_or(AppError::Internal)
    }

    async fn find_by_id(&self, scope: TenantScope, id: i64) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(&format!("{} WHERE p.id = ? AND p.tenant_id = ?", SELECT_PAYMENT))
            .bind(id)
            .bind(scope.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: TenantScope, filter: &PaymentFilter) -> Result<Vec<Payment>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_PAYMENT);
        qb.push(" WHERE p.tenant_id = ").push_bind(scope.id());

        if let Some(as_of) = filter.status {
            match as_of.status {
                PaymentStatus::Paid => {
                    qb.push(" AND p.paid_on IS NOT NULL");
                }
                PaymentStatus::Overdue => {
                    qb.push(" AND p.paid_on IS NULL AND p.due_date < ").push_bind(as_of.today);
                }
                PaymentStatus::Pending => {
                    qb.push(" AND p.paid_on IS NULL AND p.due_date >= ").push_bind(as_of.today);
                }
            }
        }
        if let Some(category_id) = filter.category_id {
            qb.push(" AND p.category_id = ").push_bind(category_id);
        }
        if let Some(from) = filter.due_from {
            qb.push(" AND p.due_date >= ").push_bind(from);
        }
        if let Some(to) = filter.due_to {
            qb.push(" AND p.due_date <= ").push_bind(to);
        }
        if let Some(from) = filter.competency_from {
            qb.push(" AND p.competency_date >= ").push_bind(from);
        }
        if let Some(to) = filter.competency_to {
            qb.push(" AND p.competency_date <= ").push_bind(to);
        }
        if let Some(text) = &filter.description {
            // SQLite LIKE is case-insensitive for ASCII
            qb.push(" AND p.description LIKE ")
                .push_bind(contains_pattern(text))
                .push(" ESCAPE '\\'");
        }
        qb.push(" ORDER BY p.due_date ASC, p.id ASC");

        qb.build_query_as::<Payment>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, scope: TenantScope, id: i64, fields: &PaymentFields) -> Result<Payment, AppError> {
        let result = sqlx::query(
            "UPDATE payments SET description = ?, amount = ?, competency_date = ?, due_date = ?, paid_on = ?, \
             status = ?, invoice_number = ?, category_id = ? WHERE id = ? AND tenant_id = ?"
        )
            .bind(fields.description.trim())
            .bind(fields.amount.to_string())
            .bind(fields.competency_date)
            .bind(fields.due_date)
            .bind(fields.paid_on)
            .bind(fields.status.as_str())
            .bind(&fields.invoice_number)
            .bind(fields.category_id)
            .bind(id)
            .bind(scope.id())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Payment"));
        }
        self.find_by_id(scope, id).await?.ok_or(AppError::NotFound("Payment"))
    }

    async fn delete(&self, scope: TenantScope, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(scope.id())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Payment"));
        }
        Ok(())
    }
}
