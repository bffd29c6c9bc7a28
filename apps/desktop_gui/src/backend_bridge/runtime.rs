//! Backend worker: owns the tokio runtime and the search session.

use std::{sync::Arc, thread, time::Duration};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use search_core::{spawn_search_session, HttpOrderTransport, SessionSettings};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const FULL_QUEUE_BACKOFF: Duration = Duration::from_millis(16);

pub fn launch(endpoint: Url, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport = HttpOrderTransport::new(endpoint);
        tracing::info!(endpoint = %transport.endpoint(), "backend worker ready");
        let handle = runtime.block_on(async {
            spawn_search_session(Arc::new(transport), SessionSettings::default())
        });

        let mut views = handle.subscribe();
        let view_tx = ui_tx.clone();
        let forwarder = runtime.spawn(async move {
            loop {
                let view = views.borrow_and_update().clone();
                match view_tx.try_send(UiEvent::ViewUpdated(view)) {
                    Ok(()) => {}
                    // Retry with whatever is newest by then.
                    Err(TrySendError::Full(_)) => {
                        tokio::time::sleep(FULL_QUEUE_BACKOFF).await;
                        continue;
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
                if views.changed().await.is_err() {
                    break;
                }
            }
        });
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            let name = cmd.name();
            match cmd {
                BackendCommand::Search(command) => {
                    if let Err(err) = handle.send(command) {
                        tracing::warn!(command = name, "search session rejected command: {err}");
                        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                            UiErrorContext::Search,
                            err.to_string(),
                        )));
                        break;
                    }
                }
                BackendCommand::Shutdown => break,
            }
        }

        tracing::info!("backend worker stopping");
        drop(handle);
        forwarder.abort();
        runtime.shutdown_background();
    });
}
