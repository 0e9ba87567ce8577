//! One page session: the event loop that owns a `UsersApp`.
//!
//! # Design
//! The loop is the only code that touches the app. UI messages and request
//! outcomes reach it through one unbounded channel and are applied in
//! arrival order. After each input the loop publishes a fresh `Snapshot` on
//! a watch channel (only when something visible changed) and forwards
//! notifications on a broadcast channel.
//!
//! In-flight requests hold a weak sender, so dropping every `Session`
//! handle ends the loop even while requests are outstanding; their outcomes
//! are then discarded.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use users_core::{
    Effect, HttpRequest, HttpResponse, Message, Notification, RequestId, Severity, Snapshot, TransportError,
    UserClient, UsersApp,
};

use crate::config::HostConfig;
use crate::error::HostError;
use crate::transport::Transport;

const NOTIFICATION_CAPACITY: usize = 64;

#[derive(Debug)]
enum Input {
    Ui(Message),
    Resolved(RequestId, Result<HttpResponse, TransportError>),
    Shutdown,
}

/// Handle to a running page session.
#[derive(Debug)]
pub struct Session {
    inputs: mpsc::UnboundedSender<Input>,
    snapshots: watch::Receiver<Snapshot>,
    notifications: broadcast::Sender<Notification>,
    task: JoinHandle<()>,
}

impl Session {
    /// Build the app, mount it (issuing the first list fetch) and spawn the
    /// event loop. Must be called from within a tokio runtime.
    pub fn start(config: &HostConfig, transport: impl Transport) -> Self {
        let mut app = UsersApp::new(UserClient::new(&config.base_url));
        let (inputs, receiver) = mpsc::unbounded_channel();
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        let (snapshot_tx, snapshots) = watch::channel(app.snapshot());

        let mounted = app.mount();
        let mut event_loop = EventLoop {
            app,
            transport: Arc::new(transport),
            inputs: inputs.downgrade(),
            snapshots: snapshot_tx,
            notifications: notifications.clone(),
        };
        event_loop.perform(mounted);
        event_loop.publish();
        info!(base_url = %config.base_url, "session started");

        let task = tokio::spawn(event_loop.run(receiver));
        Self {
            inputs,
            snapshots,
            notifications,
            task,
        }
    }

    pub fn send(&self, message: Message) -> Result<(), HostError> {
        self.inputs.send(Input::Ui(message)).map_err(|_| HostError::Closed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Notifications published from now on.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Stop the event loop and wait for it. Outcomes of requests still in
    /// flight are discarded when they arrive.
    pub async fn shutdown(self) -> Result<(), HostError> {
        // The loop may already be gone; joining still reports how it ended.
        let _ = self.inputs.send(Input::Shutdown);
        self.task.await?;
        Ok(())
    }
}

struct EventLoop {
    app: UsersApp,
    transport: Arc<dyn Transport>,
    inputs: mpsc::WeakUnboundedSender<Input>,
    snapshots: watch::Sender<Snapshot>,
    notifications: broadcast::Sender<Notification>,
}

impl EventLoop {
    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<Input>) {
        while let Some(input) = receiver.recv().await {
            let effects = match input {
                Input::Ui(message) => self.app.dispatch(message),
                Input::Resolved(id, outcome) => self.app.resolve(id, outcome),
                Input::Shutdown => break,
            };
            self.perform(effects);
            self.publish();
        }
        debug!(in_flight = self.app.store().in_flight(), "session event loop stopped");
    }

    fn perform(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send { id, request } => self.spawn_request(id, request),
                Effect::Notify(notification) => self.notify(notification),
            }
        }
    }

    fn spawn_request(&self, id: RequestId, request: HttpRequest) {
        let transport = Arc::clone(&self.transport);
        let inputs = self.inputs.clone();
        tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || transport.execute(&request))
                .await
                .unwrap_or_else(|e| Err(TransportError::new(e.to_string())));
            match inputs.upgrade() {
                Some(inputs) => {
                    let _ = inputs.send(Input::Resolved(id, outcome));
                }
                None => debug!(request = id.get(), "session closed, outcome discarded"),
            }
        });
    }

    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => info!(operation = ?notification.operation, "{}", notification.description),
            Severity::Error => warn!(operation = ?notification.operation, "{}", notification.description),
        }
        // No receivers is fine: nobody is showing notifications.
        let _ = self.notifications.send(notification);
    }

    fn publish(&self) {
        let next = self.app.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
