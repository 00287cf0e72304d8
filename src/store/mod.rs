pub mod notes;
pub mod session;
