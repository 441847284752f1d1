//! Inbound interaction payloads, as relayed from the chat platform.
//!
//! Only the fields the bot reads are modelled, everything else is ignored.

use std::collections::HashMap;

use rocket::serde::Deserialize;
use serde_json::Value;

use crate::db::message::StoredMessage;
use crate::db::user::NewUser;

pub const PING: u8 = 1;
pub const APPLICATION_COMMAND: u8 = 2;
pub const MESSAGE_COMPONENT: u8 = 3;

pub const CHAT_INPUT: u8 = 1;
pub const MESSAGE_CONTEXT_MENU: u8 = 3;

pub const COMPONENT_BUTTON: u8 = 2;

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<InteractionData>,
    /// Set when invoked in a direct message.
    #[serde(default)]
    pub user: Option<PlatformUser>,
    /// Set when invoked in a guild.
    #[serde(default)]
    pub member: Option<Member>,
    /// The message a component is attached to.
    #[serde(default)]
    pub message: Option<InteractionMessage>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Member {
    #[serde(default)]
    pub user: Option<PlatformUser>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct PlatformUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct InteractionMessage {
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "rocket::serde")]
pub struct InteractionData {
    #[serde(default)]
    pub name: Option<String>,
    /// Application command type.
    #[serde(default, rename = "type")]
    pub kind: Option<u8>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub component_type: Option<u8>,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub resolved: Option<Resolved>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "rocket::serde")]
pub struct Resolved {
    #[serde(default)]
    pub messages: HashMap<String, ResolvedMessage>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ResolvedMessage {
    pub author: PlatformUser,
    #[serde(flatten)]
    pub message: StoredMessage,
}

pub fn parse_snowflake(id: &str) -> Option<i64> {
    id.parse::<i64>().ok().filter(|id| *id > 0)
}

impl PlatformUser {
    pub fn snowflake(&self) -> Option<i64> {
        parse_snowflake(&self.id)
    }

    pub fn to_new_user(&self) -> Option<NewUser> {
        Some(NewUser {
            id: self.snowflake()?,
            username: self.username.clone(),
            display_name: self.global_name.clone(),
            avatar_hash: self.avatar.clone(),
        })
    }
}

impl Interaction {
    /// The user who triggered the interaction.
    pub fn invoker(&self) -> Option<&PlatformUser> {
        self.user
            .as_ref()
            .or_else(|| self.member.as_ref().and_then(|m| m.user.as_ref()))
    }

    pub fn data(&self) -> &InteractionData {
        static EMPTY: once_cell::sync::Lazy<InteractionData> =
            once_cell::sync::Lazy::new(InteractionData::default);
        self.data.as_ref().unwrap_or(&EMPTY)
    }
}

impl InteractionData {
    fn option(&self, name: &str) -> Option<&Value> {
        self.options
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .and_then(|o| o.value.as_ref())
    }

    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(Value::as_str)
    }

    pub fn option_bool(&self, name: &str) -> Option<bool> {
        self.option(name).and_then(Value::as_bool)
    }

    /// The "id or alias" a command refers to. Older clients send `id`.
    pub fn bookmark_reference(&self) -> Option<String> {
        ["bookmark", "id"].iter().find_map(|&name| match self.option(name)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// The message a context menu command was invoked on.
    pub fn target_message(&self) -> Option<&ResolvedMessage> {
        let target = self.target_id.as_deref()?;
        self.resolved.as_ref()?.messages.get(target)
    }
}
