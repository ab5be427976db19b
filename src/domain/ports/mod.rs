use crate::domain::models::{
    category::{Category, CategoryFields},
    payment::{Payment, PaymentFields, PaymentFilter},
    tenant::{Tenant, TenantScope},
    user::{NewUser, User},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, company_name: &str) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>, AppError>;
    async fn list(&self) -> Result<Vec<Tenant>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}

/// Categories owned by a single tenant. Every operation is bounded by `scope`.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, scope: TenantScope, fields: &CategoryFields) -> Result<Category, AppError>;
    async fn find_by_id(&self, scope: TenantScope, id: i64) -> Result<Option<Category>, AppError>;
    async fn list(&self, scope: TenantScope) -> Result<Vec<Category>, AppError>;
    async fn update(&self, scope: TenantScope, id: i64, fields: &CategoryFields) -> Result<Category, AppError>;
    async fn delete(&self, scope: TenantScope, id: i64) -> Result<(), AppError>;
}

/// Payments owned by a single tenant. Every operation is bounded by `scope`.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, scope: TenantScope, fields: &PaymentFields) -> Result<Payment, AppError>;
    async fn find_by_id(&self, scope: TenantScope, id: i64) -> Result<Option<Payment>, AppError>;
    async fn list(&self, scope: TenantScope, filter: &PaymentFilter) -> Result<Vec<Payment>, AppError>;
    async fn update(&self, scope: TenantScope, id: i64, fields: &PaymentFields) -> Result<Payment, AppError>;
    async fn delete(&self, scope: TenantScope, id: i64) -> Result<(), AppError>;
}
