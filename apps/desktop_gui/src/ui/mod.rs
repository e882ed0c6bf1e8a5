//! UI layer for the desktop order form.

pub mod app;

pub use app::OrderFormApp;
