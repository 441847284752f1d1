//! Outbound interaction responses: messages, bookmark embeds and the search
//! navigation buttons.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use rocket::serde::{Deserialize, Serialize};

use crate::db::search::BookmarkDetail;
use crate::search::{Page, SearchQuery};

pub const PONG: u8 = 1;
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
pub const UPDATE_MESSAGE: u8 = 7;

pub const EPHEMERAL: u64 = 1 << 6;

const ACTION_ROW: u8 = 1;
const BUTTON: u8 = 2;
const STYLE_PRIMARY: u8 = 1;
const STYLE_LINK: u8 = 5;

const MAX_FOOTER_TAGS_LENGTH: usize = 1024;

static QUOTED_QUERY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]*)`").expect("valid quoted query regex"));

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessagePayload>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: PONG,
            data: None,
        }
    }

    pub fn message(data: MessagePayload) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(data),
        }
    }

    /// Edits the message the clicked component belongs to.
    pub fn update(data: MessagePayload) -> Self {
        Self {
            kind: UPDATE_MESSAGE,
            data: Some(data),
        }
    }

    /// A private text message to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::message(MessagePayload::text(content).ephemeral())
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Embeds and components are always sent, so an update drops the old ones.
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl MessagePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or_default() | EPHEMERAL);
        self
    }

    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(|f| f & EPHEMERAL != 0)
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn row(mut self, row: ActionRow) -> Self {
        self.components.push(row);
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct Embed {
    pub author: EmbedAuthor,
    pub description: String,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct EmbedFooter {
    pub text: String,
}

impl Embed {
    pub fn from_bookmark(detail: &BookmarkDetail) -> Self {
        let author = &detail.author;
        let name = match author.display_name.as_deref() {
            Some(display) => format!("{} ({})", author.username, display),
            None => author.username.clone(),
        };

        let mut footer = format!("#{}", detail.bookmark.user_bookmark_id);
        if let Some(alias) = detail.bookmark.alias.as_deref() {
            footer.push_str(&format!(" ({})", alias));
        }
        let user_tags = detail
            .tags
            .iter()
            .filter(|t| !t.autogenerated)
            .map(|t| t.name.as_str())
            .join(" ");
        if !user_tags.is_empty() {
            footer.push_str(" - ");
            footer.extend(user_tags.chars().take(MAX_FOOTER_TAGS_LENGTH));
        }

        Embed {
            author: EmbedAuthor {
                name,
                url: detail.message.link(),
                icon_url: avatar_url(author.id, author.avatar_hash.as_deref()),
            },
            description: detail.message.content.clone(),
            timestamp: detail.message.timestamp.clone(),
            footer: EmbedFooter { text: footer },
        }
    }
}

pub fn avatar_url(user_id: i64, avatar_hash: Option<&str>) -> String {
    match avatar_hash {
        Some(hash) => format!("https://cdn.discordapp.com/avatars/{}/{}.png", user_id, hash),
        None => format!(
            "https://cdn.discordapp.com/embed/avatars/{}.png",
            (user_id >> 22) % 6
        ),
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Button>,
}

impl ActionRow {
    pub fn new(components: Vec<Button>) -> Self {
        Self {
            kind: ACTION_ROW,
            components,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: u8,
    pub style: u8,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Button {
    pub fn primary(label: &str, custom_id: String) -> Self {
        Self {
            kind: BUTTON,
            style: STYLE_PRIMARY,
            label: label.to_string(),
            custom_id: Some(custom_id),
            url: None,
        }
    }

    pub fn link(label: &str, url: String) -> Self {
        Self {
            kind: BUTTON,
            style: STYLE_LINK,
            label: label.to_string(),
            custom_id: None,
            url: Some(url),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Back,
}

/// Payload of a search navigation button's `custom_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(crate = "rocket::serde")]
pub struct SearchButtonId {
    pub t: String,
    pub mode: Direction,
    /// `user_bookmark_id` of the bookmark displayed when the button was made.
    pub index: i32,
}

pub const SEARCH_BUTTON: &str = "search";

impl SearchButtonId {
    pub fn new(mode: Direction, index: i32) -> Self {
        Self {
            t: SEARCH_BUTTON.to_string(),
            mode,
            index,
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(custom_id: &str) -> Option<Self> {
        serde_json::from_str(custom_id).ok()
    }
}

/// Back/Forward buttons around a jump link. Back is left out on the first
/// result and Forward on the last.
pub fn navigation_row(page: &Page<'_, BookmarkDetail>) -> ActionRow {
    let index = page.selected.bookmark.user_bookmark_id;
    let back = (!page.is_first).then(|| {
        Button::primary("Back", SearchButtonId::new(Direction::Back, index).encode())
    });
    let jump = Button::link("Jump to Message", page.selected.message.link());
    let forward = (!page.is_last).then(|| {
        Button::primary(
            "Forward",
            SearchButtonId::new(Direction::Forward, index).encode(),
        )
    });
    ActionRow::new(back.into_iter().chain([jump]).chain(forward).collect())
}

pub fn results_content(query: &SearchQuery, total: usize) -> String {
    format!(
        "Search results for `{}`. ({} result{})",
        query,
        total,
        if total == 1 { "" } else { "s" }
    )
}

/// Recovers the query rendered by [`results_content`].
pub fn extract_query(content: &str) -> Option<&str> {
    QUOTED_QUERY
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The displayed search result with its navigation.
pub fn search_page(query: &SearchQuery, page: &Page<'_, BookmarkDetail>) -> MessagePayload {
    MessagePayload::text(results_content(query, page.len()))
        .embed(Embed::from_bookmark(page.selected))
        .row(navigation_row(page))
        .ephemeral()
}
