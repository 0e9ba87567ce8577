//! Render model for a single user card.

use crate::types::{User, UserId};
use crate::view::Message;

/// The two affordances every card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
}

impl CardAction {
    pub fn label(self) -> &'static str {
        match self {
            CardAction::Edit => "Edit",
            CardAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub user_id: UserId,
    pub title: String,
    pub badge: String,
    pub email: String,
    pub actions: [CardAction; 2],
}

impl CardView {
    pub fn render(user: &User) -> Self {
        Self {
            user_id: user.id,
            title: user.name.clone(),
            badge: format!("ID: {}", user.id),
            email: user.email.clone(),
            actions: [CardAction::Edit, CardAction::Delete],
        }
    }
}

/// Translate a click on one of `user`'s card actions into a view message.
pub fn activate(user: &User, action: CardAction) -> Message {
    match action {
        CardAction::Edit => Message::Edit(user.clone()),
        CardAction::Delete => Message::RequestDelete(user.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            created_at: Some("2024-01-01 00:00:00".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn renders_name_badge_and_email() {
        let card = CardView::render(&ana());
        assert_eq!(card.title, "Ana");
        assert_eq!(card.badge, "ID: 1");
        assert_eq!(card.email, "ana@x.com");
        assert_eq!(card.actions.map(CardAction::label), ["Edit", "Delete"]);
    }

    #[test]
    fn actions_forward_user_or_id() {
        assert_eq!(activate(&ana(), CardAction::Edit), Message::Edit(ana()));
        assert_eq!(activate(&ana(), CardAction::Delete), Message::RequestDelete(1));
    }
}
