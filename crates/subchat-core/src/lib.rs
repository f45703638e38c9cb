//! Core subchat library (config, backend clients, session, chat collection).

pub mod auth;
pub mod chats;
pub mod config;
pub mod graphql;
pub mod logging;
pub mod theme;
