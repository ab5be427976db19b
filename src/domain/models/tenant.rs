use serde::Serialize;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A customer company ("Cliente"). Every category and payment belongs to exactly one.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Tenant {
    pub id: i64,
    #[serde(rename = "nome_empresa")]
    pub company_name: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// Proof that a tenant id came out of tenant resolution for the current request.
///
/// Tenant-owned repository operations take a `TenantScope` rather than a bare id, so a query
/// cannot be issued without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope(i64);

impl TenantScope {
    pub(crate) fn new(tenant_id: i64) -> Self {
        Self(tenant_id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}
