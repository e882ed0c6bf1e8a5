//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. On failure the reason is returned so
/// the caller can unwind whatever state it set up for the command.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure)"
                .to_string(),
        ),
    }
}
