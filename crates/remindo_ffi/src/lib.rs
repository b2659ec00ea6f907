//! FFI crate for the Remindo mobile shell.

pub mod api;
