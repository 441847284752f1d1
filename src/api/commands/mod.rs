//! Command table of the bot.
//!
//! Every interaction resolves to one [`Command`], whose handler turns it into
//! a reply. Handlers report expected outcomes (nothing found, rejected input)
//! as [`CommonError`]s, which are answered privately to the user.

mod alias;
mod bookmark;
mod definitions;
mod delete;
mod search;
mod show;
mod tag;

use diesel_async::AsyncPgConnection;

pub use definitions::command_definitions;

use super::payload::{
    Interaction, InteractionData, APPLICATION_COMMAND, CHAT_INPUT, COMPONENT_BUTTON,
    MESSAGE_COMPONENT, MESSAGE_CONTEXT_MENU,
};
use super::reply::{InteractionResponse, SearchButtonId, SEARCH_BUTTON};
use crate::db::bookmark::{resolve_bookmark, Bookmark};
use crate::db::user::User;
use crate::utils::CommonError;

pub type Reply = InteractionResponse;

/// What a handler gets to work with.
pub struct Context<'a> {
    pub conn: &'a mut AsyncPgConnection,
    /// The invoking user, already mirrored into the store.
    pub user: &'a User,
    pub interaction: &'a Interaction,
}

impl Context<'_> {
    pub fn data(&self) -> &InteractionData {
        self.interaction.data()
    }

    /// The bookmark named by the `bookmark` option, as "id or alias".
    pub async fn referenced_bookmark(&mut self) -> Result<Bookmark, CommonError> {
        let reference = self
            .data()
            .bookmark_reference()
            .ok_or(CommonError::NotFound)?;
        resolve_bookmark(self.conn, self.user.id, &reference)
            .await?
            .ok_or(CommonError::NotFound)
    }
}

#[rocket::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Search,
    SearchButton,
    Show,
    Tag,
    Alias,
    Delete,
    Bookmark,
}

impl Command {
    pub fn resolve(interaction: &Interaction) -> Option<Command> {
        let data = interaction.data.as_ref()?;
        match interaction.kind {
            APPLICATION_COMMAND => match data.kind.unwrap_or(CHAT_INPUT) {
                CHAT_INPUT => Self::chat_input(data.name.as_deref()?),
                MESSAGE_CONTEXT_MENU => data
                    .name
                    .as_deref()?
                    .eq_ignore_ascii_case("bookmark")
                    .then_some(Command::Bookmark),
                _ => None,
            },
            MESSAGE_COMPONENT if data.component_type == Some(COMPONENT_BUTTON) => {
                let id = SearchButtonId::decode(data.custom_id.as_deref()?)?;
                id.t.eq_ignore_ascii_case(SEARCH_BUTTON)
                    .then_some(Command::SearchButton)
            }
            _ => None,
        }
    }

    fn chat_input(name: &str) -> Option<Command> {
        Some(match name.to_lowercase().as_str() {
            "search" => Command::Search,
            "show" => Command::Show,
            "tag" => Command::Tag,
            "alias" => Command::Alias,
            "delete" => Command::Delete,
            _ => return None,
        })
    }

    pub fn handler(self) -> &'static dyn CommandHandler {
        match self {
            Command::Search => &search::Search,
            Command::SearchButton => &search::SearchButton,
            Command::Show => &show::Show,
            Command::Tag => &tag::Tag,
            Command::Alias => &alias::Alias,
            Command::Delete => &delete::Delete,
            Command::Bookmark => &bookmark::BookmarkMessage,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::payload::test::chat_input;

    fn resolve(raw: serde_json::Value) -> Option<Command> {
        let interaction: Interaction = serde_json::from_value(raw).unwrap();
        Command::resolve(&interaction)
    }

    #[test]
    fn test_resolve_chat_input() {
        for (name, expected) in [
            ("search", Some(Command::Search)),
            ("Show", Some(Command::Show)),
            ("tag", Some(Command::Tag)),
            ("alias", Some(Command::Alias)),
            ("DELETE", Some(Command::Delete)),
            ("unknown", None),
        ] {
            assert_eq!(
                resolve(chat_input(name, serde_json::json!([]))),
                expected,
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_resolve_context_menu() {
        let raw = serde_json::json!({
            "type": APPLICATION_COMMAND,
            "data": {"type": MESSAGE_CONTEXT_MENU, "name": "Bookmark", "target_id": "1"},
            "user": {"id": "1", "username": "someone"}
        });
        assert_eq!(resolve(raw), Some(Command::Bookmark));

        let raw = serde_json::json!({
            "type": APPLICATION_COMMAND,
            "data": {"type": MESSAGE_CONTEXT_MENU, "name": "Quote", "target_id": "1"},
            "user": {"id": "1", "username": "someone"}
        });
        assert_eq!(resolve(raw), None);
    }

    #[test]
    fn test_resolve_button() {
        let button = |custom_id: &str| {
            serde_json::json!({
                "type": MESSAGE_COMPONENT,
                "data": {"component_type": COMPONENT_BUTTON, "custom_id": custom_id},
                "message": {"content": "Search results for `*`. (2 results)"},
                "user": {"id": "1", "username": "someone"}
            })
        };
        assert_eq!(
            resolve(button(r#"{"t":"search","mode":"forward","index":3}"#)),
            Some(Command::SearchButton)
        );
        assert_eq!(
            resolve(button(r#"{"t":"other","mode":"forward","index":3}"#)),
            None
        );
        assert_eq!(resolve(button("garbage")), None);
    }

    #[test]
    fn ping_is_not_a_command() {
        assert_eq!(resolve(serde_json::json!({"type": 1})), None);
    }
}
