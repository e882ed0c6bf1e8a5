//! Events flowing from the backend worker back to the UI thread.

use client_core::SubmitError;
use shared::{domain::FormRecord, protocol::SubmitResponse};

pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    SubmitFinished {
        record: FormRecord,
        outcome: Result<SubmitResponse, SubmitError>,
    },
}
