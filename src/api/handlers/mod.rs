pub mod category;
pub mod health;
pub mod payment;
pub mod profile;
pub mod tenant;
