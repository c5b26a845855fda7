//! User and chat caches.
//!
//! Both caches are keyed upsert maps: an entry exists only after the backend
//! reported it, and a new report replaces the previous record wholesale
//! (chats additionally accept partial merges). Nothing is evicted during a
//! session.

use std::collections::HashMap;

use fernwire_proto::{Chat, ChatChange, ChatId, RawId, User, UserId, UserStatus};

/// A cached user with its projected status.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// User as last reported.
    pub user: User,
    /// Typed projection of `user.status`.
    pub status: UserStatus,
}

impl UserRecord {
    /// Build a record, projecting the raw status.
    pub fn new(user: User) -> Self {
        let status = UserStatus::from_wire(user.status.as_ref());
        Self { user, status }
    }

    /// User identifier.
    pub fn id(&self) -> &UserId {
        &self.user.id
    }
}

/// Users split into the self user and everyone else.
///
/// Routing compares the user id against the `my_id` option. Until that
/// option arrives every user is filed under "others"; when it arrives the
/// matching entry is promoted.
#[derive(Debug, Default, Clone)]
pub struct UserCache {
    me: Option<UserRecord>,
    others: HashMap<UserId, UserRecord>,
}

impl UserCache {
    /// Insert or replace a user, returning the stored record.
    pub fn upsert(&mut self, user: User, my_id: Option<&RawId>) -> UserRecord {
        let record = UserRecord::new(user);
        if my_id.is_some_and(|my_id| record.id().0.same_identity(my_id)) {
            self.others.remove(record.id());
            self.me = Some(record.clone());
        } else {
            self.others.insert(record.id().clone(), record.clone());
        }
        record
    }

    /// Re-file users after the self identifier became known or changed.
    ///
    /// A previous self user that no longer matches is moved back to the
    /// others; a cached other user that matches becomes the self user.
    pub fn promote(&mut self, my_id: &RawId) {
        if let Some(me) = self.me.take_if(|me| !me.id().0.same_identity(my_id)) {
            self.others.insert(me.id().clone(), me);
        }
        if self.me.is_some() {
            return;
        }
        let matching = self.others.keys().find(|id| id.0.same_identity(my_id)).cloned();
        if let Some(id) = matching {
            self.me = self.others.remove(&id);
        }
    }

    /// Move the self user back to the others once no self identifier is known.
    pub fn demote(&mut self) {
        if let Some(me) = self.me.take() {
            self.others.insert(me.id().clone(), me);
        }
    }

    /// The self user, once known.
    pub fn me(&self) -> Option<&UserRecord> {
        self.me.as_ref()
    }

    /// Look up any user, self included.
    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.me.as_ref().filter(|me| me.id() == id).or_else(|| self.others.get(id))
    }

    /// All cached users, self first. Order among others is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.me.iter().chain(self.others.values())
    }

    /// Number of cached users, self included.
    pub fn len(&self) -> usize {
        usize::from(self.me.is_some()) + self.others.len()
    }

    /// Whether no user has been cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Chats keyed by identifier.
#[derive(Debug, Default, Clone)]
pub struct ChatCache {
    chats: HashMap<ChatId, Chat>,
}

impl ChatCache {
    /// Insert or replace a chat. Returns `true` when the id was not cached.
    pub fn upsert(&mut self, chat: Chat) -> bool {
        self.chats.insert(chat.id.clone(), chat).is_none()
    }

    /// Merge a partial update into a known chat.
    ///
    /// Returns the merged record. An unknown chat is never created by a
    /// partial update; the change is handed back instead.
    pub fn apply(&mut self, id: &ChatId, change: ChatChange) -> Result<&Chat, ChatChange> {
        let Some(chat) = self.chats.get_mut(id) else {
            return Err(change);
        };
        change.apply(chat);
        Ok(&*chat)
    }

    /// Look up a chat.
    pub fn get(&self, id: &ChatId) -> Option<&Chat> {
        self.chats.get(id)
    }

    /// Whether the chat has been observed.
    pub fn contains(&self, id: &ChatId) -> bool {
        self.chats.contains_key(id)
    }

    /// All cached chats. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &Chat> {
        self.chats.values()
    }

    /// Number of cached chats.
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    /// Whether no chat has been cached.
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}
