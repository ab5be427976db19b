pub mod auth;
pub mod category;
pub mod payment;
pub mod tenant;
pub mod user;
