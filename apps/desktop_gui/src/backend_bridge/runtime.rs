//! Backend worker: a dedicated thread with its own tokio runtime.

use std::{sync::Arc, thread};

use client_core::SubmissionEndpoint;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    endpoint: Arc<dyn SubmissionEndpoint>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::BackendReady);

        // One command at a time keeps a single submission in flight.
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Submit { record } => {
                    let outcome = runtime.block_on(endpoint.submit(&record));
                    if ui_tx
                        .send(UiEvent::SubmitFinished { record, outcome })
                        .is_err()
                    {
                        tracing::warn!("ui event channel closed; stopping backend worker");
                        break;
                    }
                }
            }
        }
    });
}
