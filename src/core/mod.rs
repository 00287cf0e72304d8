pub mod note;
pub mod user;
pub mod validate;
