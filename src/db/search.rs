use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};

use super::bookmark::Bookmark;
use super::message::{Message, StoredMessage};
use super::schema::{bookmarks, bookmarks_tags, messages, tags, users};
use super::tag::{BookmarkTag, Tag};
use super::user::User;
use crate::search::Searchable;
use crate::utils::DatabaseError;

/// A bookmark with everything needed to search and display it.
#[derive(Debug, Clone)]
pub struct BookmarkDetail {
    pub bookmark: Bookmark,
    pub message: StoredMessage,
    pub author: User,
    /// Ordered by name.
    pub tags: Vec<Tag>,
}

impl Searchable for BookmarkDetail {
    fn user_bookmark_id(&self) -> i32 {
        self.bookmark.user_bookmark_id
    }

    fn content(&self) -> &str {
        &self.message.content
    }

    fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Loads every bookmark of `user_id`, ordered by display number.
pub async fn load_user_bookmarks(
    conn: &mut Connection,
    user_id: i64,
) -> Result<Vec<BookmarkDetail>, DatabaseError> {
    let lst = bookmarks::table
        .filter(bookmarks::user_id.eq(user_id))
        .select(Bookmark::as_select())
        .order_by(bookmarks::user_bookmark_id.asc())
        .load::<Bookmark>(conn)
        .await?;
    tracing::debug!(user_id, count = lst.len(), "loaded bookmarks");

    if lst.is_empty() {
        return Ok(vec![]);
    }
    get_bookmark_details(conn, lst).await
}

pub async fn get_bookmark_detail(
    conn: &mut Connection,
    bookmark: Bookmark,
) -> Result<BookmarkDetail, DatabaseError> {
    get_bookmark_details(conn, vec![bookmark])
        .await?
        .pop()
        .ok_or_else(|| diesel::result::Error::NotFound.into())
}

/// Joins the cached messages, their authors and the tags onto `bookmarks`,
/// keeping the given order.
pub async fn get_bookmark_details(
    conn: &mut Connection,
    bookmarks: Vec<Bookmark>,
) -> Result<Vec<BookmarkDetail>, DatabaseError> {
    let message_ids = bookmarks.iter().map(|b| b.message_id).collect::<Vec<_>>();
    let message_map = messages::table
        .filter(messages::id.eq_any(message_ids))
        .select(Message::as_select())
        .load::<Message>(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect::<HashMap<_, _>>();

    let author_ids = message_map.values().map(|m| m.author_id).collect::<Vec<_>>();
    let author_map = users::table
        .filter(users::id.eq_any(author_ids))
        .select(User::as_select())
        .load::<User>(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect::<HashMap<_, _>>();

    let tags = BookmarkTag::belonging_to(&bookmarks)
        .inner_join(tags::table)
        .select((BookmarkTag::as_select(), Tag::as_select()))
        .order_by((bookmarks_tags::bookmark_id.asc(), tags::name.asc()))
        .load::<(BookmarkTag, Tag)>(conn)
        .await?;

    tags.grouped_by(&bookmarks)
        .into_iter()
        .zip(bookmarks)
        .map(|(tags, bookmark)| -> Result<BookmarkDetail, DatabaseError> {
            let message = message_map
                .get(&bookmark.message_id)
                .ok_or(diesel::result::Error::NotFound)?;
            let author = author_map
                .get(&message.author_id)
                .cloned()
                .ok_or(diesel::result::Error::NotFound)?;
            Ok(BookmarkDetail {
                message: message.parse()?,
                author,
                tags: tags.into_iter().map(|(_, tag)| tag).collect(),
                bookmark,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::bookmark::create_bookmark;
    use crate::db::connection;
    use crate::db::message::test::create_rand_message;
    use crate::db::tag::{attach_tags, upsert_tags};
    use crate::db::user::test::create_rand_user;
    use crate::search::{filter_and_select, parse_tag_prefixes, Navigation};

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_load_user_bookmarks() {
        let mut conn = connection::establish().await;
        let user = create_rand_user(&mut conn).await;
        let author = create_rand_user(&mut conn).await;

        let fixtures = [
            ("The Weather is nice", vec!["weather", "global"]),
            ("weather forecast for tomorrow", vec!["weather", "forecast"]),
            ("Football results", vec!["sports"]),
        ];
        for (content, tag_names) in fixtures.iter() {
            let message = create_rand_message(&mut conn, author.id, content).await;
            let bookmark = create_bookmark(&mut conn, user.id, message.id).await.unwrap();
            let tags = upsert_tags(&mut conn, user.id, tag_names, false)
                .await
                .unwrap();
            attach_tags(&mut conn, &bookmark, &tags).await.unwrap();
        }

        let details = load_user_bookmarks(&mut conn, user.id).await.unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(
            details
                .iter()
                .map(|d| d.bookmark.user_bookmark_id)
                .collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(details[0].author.id, author.id);
        assert_eq!(details[0].message.content, "The Weather is nice");
        assert_eq!(
            details[0]
                .tags
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>(),
            vec!["global", "weather"]
        );

        let query = parse_tag_prefixes("#weather tomorrow");
        let page = filter_and_select(&details, &query, Navigation::Initial).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.selected.bookmark.user_bookmark_id, 2);

        let nobody = create_rand_user(&mut conn).await;
        assert!(load_user_bookmarks(&mut conn, nobody.id)
            .await
            .unwrap()
            .is_empty());
    }
}
