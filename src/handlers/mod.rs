//! HTTP handlers for the plain-text routes and the book API.

pub mod book;
pub mod common;
