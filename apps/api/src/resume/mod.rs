//! Resume sections: personal info, summary, and work experience.

pub mod handlers;
