//! Catalog service for tabletop role-playing games: licenses, publishers,
//! authors, game systems, games, editions and products, each addressed by a
//! unique slug.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
