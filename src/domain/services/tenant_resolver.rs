use tracing::debug;

use crate::domain::models::{tenant::TenantScope, user::User};
use crate::domain::ports::TenantRepository;
use crate::error::AppError;

/// Header an administrator sends to act on behalf of another tenant.
pub const OVERRIDE_HEADER: &str = "X-Cliente-Gerenciado-Id";

/// Parses an override header value. Anything that is not an integer yields `None`.
pub fn parse_override(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<i64>().ok())
}

/// Decides which tenant's data the request operates on.
///
/// Superusers may name another tenant through [`OVERRIDE_HEADER`]; an unparseable or unknown id
/// falls back to the user's own tenant. Everyone else always gets their own tenant and the header
/// is not even looked at.
pub async fn resolve_tenant(
    tenants: &dyn TenantRepository,
    user: &User,
    override_header: Option<&str>,
) -> Result<TenantScope, AppError> {
    if user.is_superuser
        && let Some(requested) = parse_override(override_header)
    {
        if let Some(tenant) = tenants.find_by_id(requested).await? {
            debug!(user_id = user.id, tenant_id = tenant.id, "Acting on behalf of managed tenant");
            return Ok(TenantScope::new(tenant.id));
        }
        debug!(user_id = user.id, requested, "Managed tenant not found, using own tenant");
    }

    user.tenant_id.map(TenantScope::new).ok_or(AppError::NoTenant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::tenant::Tenant;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct InMemoryTenants {
        ids: Vec<i64>,
        lookups: AtomicUsize,
    }

    impl InMemoryTenants {
        fn with(ids: &[i64]) -> Self {
            Self { ids: ids.to_vec(), lookups: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl TenantRepository for InMemoryTenants {
        async fn create(&self, _company_name: &str) -> Result<Tenant, AppError> {
            Err(AppError::Internal)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>, AppError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.ids.contains(&id).then(|| Tenant {
                id,
                company_name: format!("Tenant {}", id),
                created_at: Utc::now(),
            }))
        }

        async fn list(&self) -> Result<Vec<Tenant>, AppError> {
            Ok(Vec::new())
        }
    }

    fn user(is_superuser: bool, tenant_id: Option<i64>) -> User {
        User {
            id: 7,
            username: "ana".into(),
            email: "ana@example.com".into(),
            is_superuser,
            is_active: true,
            tenant_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn override_parsing_accepts_only_integers() {
        assert_eq!(parse_override(Some("42")), Some(42));
        assert_eq!(parse_override(Some(" 42 ")), Some(42));
        assert_eq!(parse_override(Some("abc")), None);
        assert_eq!(parse_override(Some("4.2")), None);
        assert_eq!(parse_override(Some("")), None);
        assert_eq!(parse_override(None), None);
    }

    #[tokio::test]
    async fn superuser_with_valid_override_gets_that_tenant() {
        let tenants = InMemoryTenants::with(&[1, 2]);
        let scope = resolve_tenant(&tenants, &user(true, Some(1)), Some("2")).await.unwrap();
        assert_eq!(scope.id(), 2);
    }

    #[tokio::test]
    async fn superuser_with_bad_override_falls_back_to_own_tenant() {
        let tenants = InMemoryTenants::with(&[1, 2]);
        let admin = user(true, Some(1));

        let scope = resolve_tenant(&tenants, &admin, Some("not-a-number")).await.unwrap();
        assert_eq!(scope.id(), 1);

        let scope = resolve_tenant(&tenants, &admin, Some("999")).await.unwrap();
        assert_eq!(scope.id(), 1);
    }

    #[tokio::test]
    async fn regular_user_header_is_ignored_without_lookup() {
        let tenants = InMemoryTenants::with(&[1, 2]);
        let scope = resolve_tenant(&tenants, &user(false, Some(1)), Some("2")).await.unwrap();
        assert_eq!(scope.id(), 1);
        assert_eq!(tenants.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn user_without_any_tenant_is_rejected() {
        let tenants = InMemoryTenants::with(&[1]);
        let result = resolve_tenant(&tenants, &user(true, None), Some("5")).await;
        assert!(matches!(result, Err(AppError::NoTenant)));

        let scope = resolve_tenant(&tenants, &user(true, None), Some("1")).await.unwrap();
        assert_eq!(scope.id(), 1);
    }
}
