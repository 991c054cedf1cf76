use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use app_logging::app_warn;

use crate::client::{default_models, ApiBackend, ClientSettings, ReqwestBackend};
use crate::{ApiFailure, EngineEvent, OptimizeRequest, RequestId};

enum EngineCommand {
    Optimize {
        request_id: RequestId,
        request: OptimizeRequest,
    },
    GenerateMulti {
        request_id: RequestId,
        request: OptimizeRequest,
    },
    LoadModels,
}

/// Handle to the background IO thread. Commands go in over a channel; events
/// come back via `try_recv`, so the UI thread never blocks on the network.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiFailure> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let backend = Arc::new(ReqwestBackend::new(settings)?);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn optimize(&self, request_id: RequestId, request: OptimizeRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Optimize {
            request_id,
            request,
        });
    }

    pub fn generate_multi(&self, request_id: RequestId, request: OptimizeRequest) {
        let _ = self.cmd_tx.send(EngineCommand::GenerateMulti {
            request_id,
            request,
        });
    }

    pub fn load_models(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadModels);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().ok()?;
        rx.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn ApiBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Optimize {
            request_id,
            request,
        } => {
            let result = backend.optimize(&request).await;
            let _ = event_tx.send(EngineEvent::RequestCompleted { request_id, result });
        }
        EngineCommand::GenerateMulti {
            request_id,
            request,
        } => {
            let result = backend.generate_multi(&request).await;
            let _ = event_tx.send(EngineEvent::RequestCompleted { request_id, result });
        }
        EngineCommand::LoadModels => {
            let models = match backend.models().await {
                Ok(models) if !models.is_empty() => models,
                Ok(_) => {
                    app_warn!("model list endpoint returned no models, using defaults");
                    default_models()
                }
                Err(err) => {
                    app_warn!("model list fetch failed ({err}), using defaults");
                    default_models()
                }
            };
            let _ = event_tx.send(EngineEvent::ModelsLoaded(models));
        }
    }
}
