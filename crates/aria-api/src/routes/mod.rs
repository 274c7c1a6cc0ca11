pub mod chat;
pub mod coaching;
pub mod devices;
pub mod health;
