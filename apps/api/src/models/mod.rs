pub mod account;
pub mod resume;
