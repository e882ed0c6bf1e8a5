//! Bridge from the UI thread to the backend worker that owns the network.

pub mod commands;
pub mod runtime;
