//! Client handle.
//!
//! [`Client`] owns the coordinator and the application end of the receiver
//! channel. Updates are applied only inside the `next_event` family, which
//! take `&mut self`, so cache mutation and event emission never run
//! concurrently with themselves or with queries. Requests go through a
//! [`Submitter`], which can be cloned and used from other threads meanwhile.

use std::{collections::VecDeque, sync::Arc};

use fernwire_core::{Config, Coordinator, CoordinatorAction, Event, UserRecord};
use fernwire_proto::{
    AuthorizationState, Chat, ChatId, ConnectionState, File, FileId, JsonMap, OptionValue,
    Request, RequestTag, UnreadChatCount, UnreadMessageCount, Update, UserId,
};
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::{
    backend::Backend,
    error::ClientError,
    receiver::{ReceiverHandle, spawn_receiver},
    submitter::Submitter,
};

/// Handle to a running session.
///
/// Built with [`Client::start`], which spawns the receiver thread. Events are
/// pulled with [`Client::next_event`] (async), [`Client::try_next_event`]
/// (non-blocking) or [`Client::blocking_next_event`]. Queries read the
/// coordinator's caches synchronously and stay valid after shutdown.
pub struct Client<B: Backend> {
    coordinator: Coordinator,
    submitter: Submitter<B>,
    receiver: Option<ReceiverHandle>,
    updates: mpsc::UnboundedReceiver<Update>,
    pending: VecDeque<Event>,
}

impl<B: Backend> Client<B> {
    /// Issue the initial commands and start the receiver loop.
    pub fn start(backend: Arc<B>, config: Config) -> Result<Self, ClientError> {
        let timeout = config.receive_timeout();
        let coordinator = Coordinator::new(config);
        let (tx, updates) = mpsc::unbounded_channel();

        let mut client = Self {
            coordinator,
            submitter: Submitter::new(Arc::clone(&backend)),
            receiver: None,
            updates,
            pending: VecDeque::new(),
        };

        let initial = client.coordinator.start();
        client.execute(initial);

        let receiver = spawn_receiver(backend, timeout, tx).map_err(ClientError::Spawn)?;
        client.receiver = Some(receiver);
        tracing::info!("client started");

        Ok(client)
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the receiver loop has ended and every buffered
    /// update has been consumed, or after [`Client::shutdown`]. A state error
    /// is returned as `Some(Err(_))` and consumption may continue afterwards.
    pub async fn next_event(&mut self) -> Option<Result<Event, ClientError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.submitter.is_shut_down() {
                return None;
            }
            let update = self.updates.recv().await?;
            if let Err(error) = self.apply(update) {
                return Some(Err(error));
            }
        }
    }

    /// Next event if one is ready, without waiting.
    pub fn try_next_event(&mut self) -> Option<Result<Event, ClientError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.submitter.is_shut_down() {
                return None;
            }
            let update = match self.updates.try_recv() {
                Ok(update) => update,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            };
            if let Err(error) = self.apply(update) {
                return Some(Err(error));
            }
        }
    }

    /// Wait for the next event on a thread outside any async runtime.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context.
    pub fn blocking_next_event(&mut self) -> Option<Result<Event, ClientError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.submitter.is_shut_down() {
                return None;
            }
            let update = self.updates.blocking_recv()?;
            if let Err(error) = self.apply(update) {
                return Some(Err(error));
            }
        }
    }

    fn apply(&mut self, update: Update) -> Result<(), ClientError> {
        let actions = self.coordinator.handle(update)?;
        self.execute(actions);
        Ok(())
    }

    fn execute(&mut self, actions: Vec<CoordinatorAction>) {
        for action in actions {
            match action {
                CoordinatorAction::Emit(event) => self.pending.push_back(event),
                CoordinatorAction::Send(request) => {
                    if let Err(error) = self.send(request) {
                        tracing::warn!(%error, "follow-up request failed");
                    }
                },
            }
        }
    }

    /// Cloneable handle for submitting requests from other threads or tasks.
    ///
    /// Clones share this client's tag sequence and stop working after
    /// [`Client::shutdown`].
    pub fn submitter(&self) -> Submitter<B> {
        self.submitter.clone()
    }

    /// Submit a request without waiting for its reply. See [`Submitter::send`].
    pub fn send(&self, request: Request) -> Result<RequestTag, ClientError> {
        self.submitter.send(request)
    }

    /// Submit an arbitrary request object. See [`Submitter::send_raw`].
    pub fn send_raw(&self, request: JsonMap) -> Result<RequestTag, ClientError> {
        self.submitter.send_raw(request)
    }

    /// Answer `WaitPhoneNumber`.
    pub fn set_authentication_phone_number(
        &self,
        phone_number: impl Into<String>,
    ) -> Result<RequestTag, ClientError> {
        self.submitter.set_authentication_phone_number(phone_number)
    }

    /// Answer `WaitCode`.
    pub fn check_authentication_code(
        &self,
        code: impl Into<String>,
    ) -> Result<RequestTag, ClientError> {
        self.submitter.check_authentication_code(code)
    }

    /// Answer `WaitPassword`.
    pub fn check_authentication_password(
        &self,
        password: impl Into<String>,
    ) -> Result<RequestTag, ClientError> {
        self.submitter.check_authentication_password(password)
    }

    /// Load up to `limit` chats. See [`Submitter::get_chats`].
    pub fn get_chats(&self, limit: i32) -> Result<RequestTag, ClientError> {
        self.submitter.get_chats(limit)
    }

    /// Start downloading a file. See [`Submitter::download_file`].
    pub fn download_file(&self, file_id: FileId) -> Result<RequestTag, ClientError> {
        self.submitter.download_file(file_id)
    }

    /// Ask the backend to close the session. See [`Submitter::close`].
    pub fn close(&self) -> Result<RequestTag, ClientError> {
        self.submitter.close()
    }

    /// Stop the receiver loop and release the backend.
    ///
    /// Idempotent. No events are produced afterwards; queries keep returning
    /// the last snapshot.
    pub fn shutdown(&mut self) {
        let Some(backend) = self.submitter.shut_down() else {
            return;
        };
        if let Some(mut receiver) = self.receiver.take() {
            receiver.join();
        }
        self.updates.close();
        self.pending.clear();
        drop(backend);
        tracing::info!("client shut down");
    }

    /// Whether [`Client::shutdown`] has run.
    pub fn is_shut_down(&self) -> bool {
        self.submitter.is_shut_down()
    }

    /// Underlying coordinator, for queries not mirrored here.
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Backend version, once reported.
    pub fn version(&self) -> Option<&str> {
        self.coordinator.version()
    }

    /// Current authorization state.
    pub fn authorization_state(&self) -> &AuthorizationState {
        self.coordinator.authorization_state()
    }

    /// Current connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        self.coordinator.connection_state()
    }

    /// The authorized user, once known.
    pub fn me(&self) -> Option<&UserRecord> {
        self.coordinator.me()
    }

    /// Look up a user.
    pub fn user(&self, id: &UserId) -> Option<&UserRecord> {
        self.coordinator.user(id)
    }

    /// Look up a chat.
    pub fn chat(&self, id: &ChatId) -> Option<&Chat> {
        self.coordinator.chat(id)
    }

    /// Look up a file.
    pub fn file(&self, id: FileId) -> Option<&File> {
        self.coordinator.file(id)
    }

    /// Most recent value of an option.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.coordinator.option(name)
    }

    /// Latest unread message counters.
    pub fn unread_message_count(&self) -> Option<&UnreadMessageCount> {
        self.coordinator.unread_message_count()
    }

    /// Latest unread chat counters.
    pub fn unread_chat_count(&self) -> Option<&UnreadChatCount> {
        self.coordinator.unread_chat_count()
    }
}

impl<B: Backend> Drop for Client<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
