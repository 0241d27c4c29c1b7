// src/domain/mod.rs
pub mod catalog;
pub mod errors;
pub mod slug;
pub mod user;
