//! One page worth of state: the store plus the view that drives it.

use tracing::debug;

use crate::client::UserClient;
use crate::http::{HttpResponse, TransportError};
use crate::store::{Effect, RequestId, UserStore};
use crate::types::User;
use crate::view::{Intent, Message, Mode, Screen, UsersView};

/// Everything a subscriber may want to show, captured after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub screen: Screen,
    pub users: Vec<User>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub creating: bool,
    pub updating: bool,
    pub deleting: bool,
}

#[derive(Debug)]
pub struct UsersApp {
    store: UserStore,
    view: UsersView,
}

impl UsersApp {
    pub fn new(client: UserClient) -> Self {
        Self {
            store: UserStore::new(client),
            view: UsersView::new(),
        }
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        self.store.mount()
    }

    /// Route a UI message through the view and hand any resulting intent to
    /// the store. Messages aimed at a disabled control are dropped.
    pub fn dispatch(&mut self, message: Message) -> Vec<Effect> {
        if self.is_disabled(&message) {
            debug!(?message, "control disabled, message dropped");
            return Vec::new();
        }
        match self.view.update(message) {
            Some(Intent::Create(input)) => self.store.create(input),
            Some(Intent::Update(input)) => self.store.update(input),
            Some(Intent::Remove(id)) => self.store.remove(id),
            None => Vec::new(),
        }
    }

    pub fn resolve(
        &mut self,
        id: RequestId,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Vec<Effect> {
        self.store.resolve(id, outcome)
    }

    pub fn render(&self) -> Screen {
        self.view.render(&self.store)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.render(),
            users: self.store.users().to_vec(),
            is_loading: self.store.is_loading(),
            error: self.store.error().map(ToString::to_string),
            creating: self.store.is_creating(),
            updating: self.store.is_updating(),
            deleting: self.store.is_deleting(),
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn view(&self) -> &UsersView {
        &self.view
    }

    fn is_disabled(&self, message: &Message) -> bool {
        match message {
            Message::Submit | Message::Cancel => {
                self.view.mode() == Mode::Form && (self.store.is_creating() || self.store.is_updating())
            }
            Message::ConfirmDelete => self.store.is_deleting(),
            _ => false,
        }
    }
}
