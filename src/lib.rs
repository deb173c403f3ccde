//! Quill - a small slash-command Discord bot backed by a document store.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
