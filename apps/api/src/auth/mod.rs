//! Authentication: password hashing, bearer tokens, and the account flows
//! built on them.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod service;
pub mod token;
