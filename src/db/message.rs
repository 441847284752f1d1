use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use serde::{Deserialize, Serialize};

use super::schema::{bookmarks, messages};
use crate::utils::DatabaseError;

/// Cached copy of a bookmarked message, shared by every bookmark of it.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Message {
    pub id: i64,
    pub author_id: i64,
    /// JSON encoded [`StoredMessage`].
    pub data: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub id: i64,
    pub author_id: i64,
    pub data: String,
}

/// The parts of a chat message kept at bookmark time.
///
/// Ids are snowflakes encoded as strings, the way the platform sends them.
/// Unknown fields are dropped when a platform message is stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    pub channel_id: String,
    #[serde(default)]
    pub content: String,
    pub timestamp: String,
    #[serde(default)]
    pub edited_timestamp: Option<String>,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default)]
    pub embeds: Vec<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub message_reference: Option<serde_json::Value>,
}

impl StoredMessage {
    /// Deep link to the original message.
    pub fn link(&self) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id.as_deref().unwrap_or("@me"),
            self.channel_id,
            self.id
        )
    }

    /// Tags the system attaches to every new bookmark of this message.
    pub fn autogenerated_tags(&self) -> Vec<&'static str> {
        let content = self.content.to_lowercase();
        [
            (!self.attachments.is_empty()).then_some("has:attachment"),
            (!self.embeds.is_empty()).then_some("has:embed"),
            (content.contains("http://") || content.contains("https://")).then_some("has:link"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Message {
    pub fn parse(&self) -> Result<StoredMessage, DatabaseError> {
        serde_json::from_str(&self.data).map_err(|source| DatabaseError::MalformedMessage {
            id: self.id,
            source,
        })
    }
}

impl NewMessage {
    pub fn new(id: i64, author_id: i64, stored: &StoredMessage) -> Result<Self, serde_json::Error> {
        Ok(NewMessage {
            id,
            author_id,
            data: serde_json::to_string(stored)?,
        })
    }
}

/// Inserts the snapshot, or refreshes it when the message is already cached.
pub async fn upsert_message(
    conn: &mut Connection,
    new: &NewMessage,
) -> Result<Message, DatabaseError> {
    Ok(diesel::insert_into(messages::table)
        .values(new)
        .on_conflict(messages::id)
        .do_update()
        .set(new)
        .returning(Message::as_returning())
        .get_result(conn)
        .await?)
}

/// Deletes the cached message unless a bookmark still references it.
/// Returns whether it was deleted.
pub async fn delete_message_if_orphaned(
    conn: &mut Connection,
    id: i64,
) -> Result<bool, DatabaseError> {
    let remaining: i64 = bookmarks::table
        .filter(bookmarks::message_id.eq(id))
        .count()
        .get_result(conn)
        .await?;
    if remaining > 0 {
        return Ok(false);
    }

    let deleted = diesel::delete(messages::table.find(id))
        .execute(conn)
        .await?;
    Ok(deleted == 1)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::utils::rand::{rand_snowflake, rand_str};

    pub fn rand_stored_message(content: &str) -> StoredMessage {
        StoredMessage {
            id: rand_snowflake().to_string(),
            guild_id: None,
            channel_id: rand_snowflake().to_string(),
            content: content.to_string(),
            timestamp: "2024-07-01T12:00:00.000000+00:00".to_string(),
            edited_timestamp: None,
            attachments: vec![],
            embeds: vec![],
            kind: 0,
            message_reference: None,
        }
    }

    pub async fn create_rand_message(
        conn: &mut Connection,
        author_id: i64,
        content: &str,
    ) -> Message {
        let stored = rand_stored_message(content);
        let new = NewMessage::new(stored.id.parse().unwrap(), author_id, &stored).unwrap();
        upsert_message(conn, &new).await.unwrap()
    }

    #[test]
    fn parse_platform_message() {
        let raw = r#"{
            "id": "1250000000000000001",
            "guild_id": null,
            "channel_id": "1250000000000000002",
            "author": {"id": "1250000000000000003", "username": "someone"},
            "content": "look https://www.rust-lang.org",
            "timestamp": "2024-07-01T12:00:00.000000+00:00",
            "edited_timestamp": null,
            "attachments": [{"id": "1", "filename": "a.png"}],
            "embeds": [],
            "type": 0,
            "pinned": false
        }"#;
        let stored: StoredMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(stored.id, "1250000000000000001");
        assert!(stored.guild_id.is_none());
        assert_eq!(stored.content, "look https://www.rust-lang.org");
        assert_eq!(
            stored.link(),
            "https://discord.com/channels/@me/1250000000000000002/1250000000000000001"
        );
        assert_eq!(stored.autogenerated_tags(), vec!["has:attachment", "has:link"]);
    }

    #[test]
    fn guild_message_link() {
        let mut stored = rand_stored_message("hello");
        stored.guild_id = Some("42".to_string());
        stored.channel_id = "43".to_string();
        stored.id = "44".to_string();
        assert_eq!(stored.link(), "https://discord.com/channels/42/43/44");
        assert!(stored.autogenerated_tags().is_empty());
    }

    #[test]
    fn parse_malformed_message() {
        let message = Message {
            id: 7,
            author_id: 1,
            data: rand_str(10),
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        let rv = message.parse();
        assert!(matches!(
            rv,
            Err(DatabaseError::MalformedMessage { id: 7, .. })
        ));
    }

    #[test]
    fn stored_message_survives_storage() {
        let stored = rand_stored_message("Hello *world*");
        let new = NewMessage::new(1, 2, &stored).unwrap();
        let message = Message {
            id: new.id,
            author_id: new.author_id,
            data: new.data,
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        assert_eq!(message.parse().unwrap(), stored);
    }
}
