use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::schema::{bookmarks_tags, tags};
use crate::utils::DatabaseError;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tag {
    pub id: i32,
    pub user_id: i64,
    pub name: String,
    /// Attached by the bot rather than by the user.
    pub autogenerated: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

#[derive(Insertable, Identifiable, Selectable, Queryable, Associations, Debug)]
#[diesel(belongs_to(Bookmark))]
#[diesel(belongs_to(Tag))]
#[diesel(table_name = bookmarks_tags)]
#[diesel(primary_key(bookmark_id, tag_id))]
pub struct BookmarkTag {
    pub bookmark_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = tags)]
pub struct NewTag<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub autogenerated: bool,
}

/// Creates the missing tags of `user_id` and returns all of them.
///
/// An existing tag keeps its `autogenerated` flag.
pub async fn upsert_tags(
    conn: &mut Connection,
    user_id: i64,
    names: &[&str],
    autogenerated: bool,
) -> Result<Vec<Tag>, DatabaseError> {
    use diesel::dsl::now;

    if names.is_empty() {
        return Ok(vec![]);
    }
    let new_tags = names
        .iter()
        .map(|&name| NewTag {
            user_id,
            name,
            autogenerated,
        })
        .collect::<Vec<_>>();

    Ok(diesel::insert_into(tags::table)
        .values(&new_tags)
        .on_conflict((tags::user_id, tags::name))
        .do_update()
        .set(tags::updated_at.eq(now))
        .returning(Tag::as_returning())
        .get_results(conn)
        .await?)
}

pub async fn upsert_tag(
    conn: &mut Connection,
    user_id: i64,
    name: &str,
    autogenerated: bool,
) -> Result<Tag, DatabaseError> {
    upsert_tags(conn, user_id, &[name], autogenerated)
        .await?
        .pop()
        .ok_or_else(|| diesel::result::Error::NotFound.into())
}

pub async fn attach_tags(
    conn: &mut Connection,
    bookmark: &Bookmark,
    tags: &[Tag],
) -> Result<usize, DatabaseError> {
    let links = tags
        .iter()
        .map(|tag| BookmarkTag {
            bookmark_id: bookmark.id,
            tag_id: tag.id,
        })
        .collect::<Vec<_>>();
    if links.is_empty() {
        return Ok(0);
    }

    Ok(diesel::insert_into(bookmarks_tags::table)
        .values(&links)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?)
}

/// Removes `tag` from `bookmark` when attached, attaches it otherwise.
/// Returns whether the tag is attached afterwards.
pub async fn toggle_bookmark_tag(
    conn: &mut Connection,
    bookmark: &Bookmark,
    tag: &Tag,
) -> Result<bool, DatabaseError> {
    let removed = diesel::delete(bookmarks_tags::table.find((bookmark.id, tag.id)))
        .execute(conn)
        .await?;
    if removed > 0 {
        return Ok(false);
    }

    diesel::insert_into(bookmarks_tags::table)
        .values(&BookmarkTag {
            bookmark_id: bookmark.id,
            tag_id: tag.id,
        })
        .execute(conn)
        .await?;
    Ok(true)
}
