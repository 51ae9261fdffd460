pub mod health;
pub mod quiz;
pub mod session;
pub mod validation;
