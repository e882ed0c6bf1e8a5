//! Backend commands queued from UI to backend worker.

use shared::domain::FormRecord;

pub enum BackendCommand {
    Submit { record: FormRecord },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit",
        }
    }
}
