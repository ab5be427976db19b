pub mod auth_service;
pub mod payment_status;
pub mod tenant_resolver;
