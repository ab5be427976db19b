pub mod sqlite_category_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_tenant_repo;
pub mod sqlite_user_repo;

pub mod postgres_category_repo;
pub mod postgres_payment_repo;
pub mod postgres_tenant_repo;
pub mod postgres_user_repo;

/// Builds a `LIKE` pattern matching `needle` anywhere, with wildcards in `needle` escaped by `\`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
