//! List/search/form orchestration.
//!
//! # Design
//! `UsersView` is a plain state machine driven by `Message`s. It owns the
//! UI-only state (mode, search text, the user being edited, the id awaiting
//! delete confirmation, the form) and answers each message with at most one
//! `Intent` for the store. It reads the store only when rendering.
//!
//! Submitting returns to list mode straight away; the outcome of the
//! resulting mutation is reported only through a notification.

use tracing::debug;

use crate::card::CardView;
use crate::form::{Field, FormView, UserForm};
use crate::search::filter_users;
use crate::store::UserStore;
use crate::types::{CreateUser, UpdateUser, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Form,
}

/// Everything the user can do on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SearchChanged(String),
    New,
    Edit(User),
    FieldChanged(Field, String),
    Submit,
    Cancel,
    RequestDelete(UserId),
    ConfirmDelete,
    DismissDelete,
}

/// A change the store must make on the remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create(CreateUser),
    Update(UpdateUser),
    Remove(UserId),
}

#[derive(Debug, Clone, Default)]
pub struct UsersView {
    mode: Mode,
    search: String,
    editing: Option<User>,
    pending_delete: Option<UserId>,
    form: UserForm,
}

impl UsersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, message: Message) -> Option<Intent> {
        match message {
            Message::SearchChanged(term) => {
                self.search = term;
                None
            }
            Message::New => {
                self.open_form(None);
                None
            }
            Message::Edit(user) => {
                self.open_form(Some(user));
                None
            }
            Message::FieldChanged(field, value) => {
                if self.mode == Mode::Form {
                    self.form.set(field, value);
                }
                None
            }
            Message::Submit => self.submit(),
            Message::Cancel => {
                self.close_form();
                None
            }
            Message::RequestDelete(id) => {
                self.pending_delete = Some(id);
                None
            }
            Message::ConfirmDelete => self.pending_delete.take().map(Intent::Remove),
            Message::DismissDelete => {
                self.pending_delete = None;
                None
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn editing(&self) -> Option<&User> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<UserId> {
        self.pending_delete
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn render(&self, store: &UserStore) -> Screen {
        let body = if store.is_loading() {
            Body::Loading {
                message: "Loading users...".to_string(),
            }
        } else {
            match self.mode {
                Mode::Form => Body::Form(self.form.render(store.is_creating() || store.is_updating())),
                Mode::List => Body::List(self.render_list(store.users())),
            }
        };
        let confirm_delete = self.pending_delete.map(|user_id| {
            let deleting = store.is_deleting();
            ConfirmDialog {
                user_id,
                title: "Confirm deletion".to_string(),
                description: "Are you sure you want to delete this user? This action cannot be undone."
                    .to_string(),
                confirm_label: if deleting { "Deleting..." } else { "Delete" }.to_string(),
                cancel_label: "Cancel".to_string(),
                confirm_enabled: !deleting,
            }
        });
        Screen { body, confirm_delete }
    }

    fn render_list(&self, users: &[User]) -> ListScreen {
        let cards: Vec<CardView> = filter_users(users, &self.search)
            .into_iter()
            .map(CardView::render)
            .collect();
        let count = cards.len();
        let empty = (count == 0).then(|| {
            if self.search.is_empty() {
                EmptyState {
                    title: "No users registered".to_string(),
                    hint: "Start by creating your first user".to_string(),
                    call_to_action: Some("Create first user".to_string()),
                }
            } else {
                EmptyState {
                    title: "No users found".to_string(),
                    hint: "Try adjusting your search terms".to_string(),
                    call_to_action: None,
                }
            }
        });
        ListScreen {
            search: self.search.clone(),
            count,
            count_label: if count == 1 { "user found" } else { "users found" }.to_string(),
            cards,
            empty,
        }
    }

    fn submit(&mut self) -> Option<Intent> {
        if self.mode != Mode::Form {
            return None;
        }
        let fields = match self.form.submit() {
            Ok(fields) => fields,
            Err(error) => {
                debug!(%error, "form submission rejected");
                return None;
            }
        };
        let intent = match &self.editing {
            Some(user) => Intent::Update(UpdateUser::from_submission(user.id, fields)),
            None => Intent::Create(fields),
        };
        self.close_form();
        Some(intent)
    }

    fn open_form(&mut self, user: Option<User>) {
        self.form.sync(user.as_ref());
        self.editing = user;
        self.mode = Mode::Form;
        debug!(editing = ?self.editing.as_ref().map(|u| u.id), "form opened");
    }

    fn close_form(&mut self) {
        self.mode = Mode::List;
        self.editing = None;
        self.form.reset();
    }
}

/// Render model of the whole page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub body: Body,
    /// Shown on top of the body whenever a delete awaits confirmation.
    pub confirm_delete: Option<ConfirmDialog>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading { message: String },
    List(ListScreen),
    Form(FormView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScreen {
    pub search: String,
    pub count: usize,
    pub count_label: String,
    pub cards: Vec<CardView>,
    pub empty: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
    pub call_to_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub confirm_enabled: bool,
}
