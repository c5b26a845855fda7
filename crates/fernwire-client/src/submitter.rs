//! Request submission.
//!
//! A [`Submitter`] can be cloned and handed to other threads or tasks, so
//! requests go out while the owner of the [`Client`](crate::Client) is
//! waiting on `next_event`. All clones share the tag counter and the backend
//! handle, which `Client::shutdown` releases for every clone at once.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use fernwire_proto::{FileId, JsonMap, Request, RequestTag, encode_raw};

use crate::{backend::Backend, error::ClientError};

/// Default `getChats` page size.
pub const DEFAULT_CHAT_LIMIT: i32 = 100;

/// Default `downloadFile` priority.
pub const DEFAULT_DOWNLOAD_PRIORITY: i32 = 1;

struct Shared<B> {
    backend: RwLock<Option<Arc<B>>>,
    next_tag: AtomicU64,
}

/// Cloneable request handle for a running session.
///
/// Tags are unique and increasing across all clones. After the session is
/// shut down every submission fails with [`ClientError::ShutDown`].
pub struct Submitter<B: Backend> {
    shared: Arc<Shared<B>>,
}

impl<B: Backend> Clone for Submitter<B> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<B: Backend> Submitter<B> {
    pub(crate) fn new(backend: Arc<B>) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend: RwLock::new(Some(backend)),
                next_tag: AtomicU64::new(1),
            }),
        }
    }

    /// Submit a request without waiting for its reply.
    ///
    /// The returned tag is echoed in `@extra` of the reply, which arrives
    /// later as [`Event::Unhandled`](fernwire_core::Event::Unhandled).
    pub fn send(&self, request: Request) -> Result<RequestTag, ClientError> {
        let tag = self.allocate_tag();
        let text = request.encode(tag)?;
        self.submit(&text)?;
        tracing::debug!(%tag, kind = request.kind(), "request sent");
        Ok(tag)
    }

    /// Submit an arbitrary request object.
    ///
    /// The object must carry a string `@type`; `@extra` is overwritten with
    /// the returned tag.
    pub fn send_raw(&self, request: JsonMap) -> Result<RequestTag, ClientError> {
        let tag = self.allocate_tag();
        let text = encode_raw(request, tag)?;
        self.submit(&text)?;
        tracing::debug!(%tag, "raw request sent");
        Ok(tag)
    }

    /// Answer `WaitPhoneNumber`.
    pub fn set_authentication_phone_number(
        &self,
        phone_number: impl Into<String>,
    ) -> Result<RequestTag, ClientError> {
        self.send(Request::SetAuthenticationPhoneNumber { phone_number: phone_number.into() })
    }

    /// Answer `WaitCode`.
    pub fn check_authentication_code(
        &self,
        code: impl Into<String>,
    ) -> Result<RequestTag, ClientError> {
        self.send(Request::CheckAuthenticationCode { code: code.into() })
    }

    /// Answer `WaitPassword`.
    pub fn check_authentication_password(
        &self,
        password: impl Into<String>,
    ) -> Result<RequestTag, ClientError> {
        self.send(Request::CheckAuthenticationPassword { password: password.into() })
    }

    /// Load up to `limit` chats from the top of the main list.
    ///
    /// Chats arrive as [`Event::NewChatDiscovered`](fernwire_core::Event::NewChatDiscovered).
    pub fn get_chats(&self, limit: i32) -> Result<RequestTag, ClientError> {
        self.send(Request::get_chats(limit))
    }

    /// Start downloading a file.
    ///
    /// Progress arrives as [`Event::FileUpdated`](fernwire_core::Event::FileUpdated).
    pub fn download_file(&self, file_id: FileId) -> Result<RequestTag, ClientError> {
        self.send(Request::download_file(file_id, DEFAULT_DOWNLOAD_PRIORITY))
    }

    /// Ask the backend to close the session.
    ///
    /// The backend answers with `Closing` and finally `Closed`, after which
    /// the receiver loop ends on its own.
    pub fn close(&self) -> Result<RequestTag, ClientError> {
        self.send(Request::Close)
    }

    /// Whether the session has been shut down.
    pub fn is_shut_down(&self) -> bool {
        self.shared.backend.read().unwrap_or_else(PoisonError::into_inner).is_none()
    }

    /// Release the backend for every clone. Returns the handle on first call.
    pub(crate) fn shut_down(&self) -> Option<Arc<B>> {
        self.shared.backend.write().unwrap_or_else(PoisonError::into_inner).take()
    }

    fn submit(&self, text: &str) -> Result<(), ClientError> {
        let backend = self
            .shared
            .backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ClientError::ShutDown)?;
        backend.send(text)?;
        Ok(())
    }

    fn allocate_tag(&self) -> RequestTag {
        RequestTag(self.shared.next_tag.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, thread, time::Duration};

    use super::*;
    use crate::backend::BackendError;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<String>>,
    }

    impl Backend for Recorder {
        fn send(&self, request: &str) -> Result<(), BackendError> {
            self.sent.lock().unwrap().push(request.to_owned());
            Ok(())
        }

        fn receive(&self, _timeout: Duration) -> Result<Option<String>, BackendError> {
            Ok(None)
        }
    }

    #[test]
    fn clones_share_tag_sequence() {
        let backend = Arc::new(Recorder::default());
        let submitter = Submitter::new(Arc::clone(&backend));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let submitter = submitter.clone();
                thread::spawn(move || {
                    (0..25).map(|_| submitter.close().unwrap().0).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut tags: Vec<u64> =
            handles.into_iter().flat_map(|handle| handle.join().unwrap()).collect();
        tags.sort_unstable();

        assert_eq!(tags, (1..=100).collect::<Vec<_>>());
        assert_eq!(backend.sent.lock().unwrap().len(), 100);
    }

    #[test]
    fn shut_down_applies_to_every_clone() {
        let submitter = Submitter::new(Arc::new(Recorder::default()));
        let other = submitter.clone();

        assert!(submitter.shut_down().is_some());
        assert!(submitter.shut_down().is_none());

        assert!(other.is_shut_down());
        assert!(matches!(other.get_chats(10), Err(ClientError::ShutDown)));
    }
}
