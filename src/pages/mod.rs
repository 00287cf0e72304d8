pub mod activity;
pub mod login;
pub mod notes;
pub mod settings;
