use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use serde::{Deserialize, Serialize};

use super::message::{self, Message};
use super::schema::bookmarks;
use crate::utils::DatabaseError;

#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    Deserialize,
    Serialize,
    Hash,
    PartialEq,
    Eq,
    Debug,
    Clone,
)]
#[diesel(belongs_to(Message))]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bookmark {
    pub id: i32,
    pub user_id: i64,
    pub user_bookmark_id: i32,
    pub alias: Option<String>,
    pub message_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark {
    pub user_id: i64,
    pub user_bookmark_id: i32,
    pub message_id: i64,
}

/// Display number the next bookmark of `user_id` gets.
pub async fn next_user_bookmark_id(
    conn: &mut Connection,
    user_id: i64,
) -> Result<i32, DatabaseError> {
    use diesel::dsl::max;

    let current: Option<i32> = bookmarks::table
        .filter(bookmarks::user_id.eq(user_id))
        .select(max(bookmarks::user_bookmark_id))
        .first(conn)
        .await?;
    Ok(current.unwrap_or_default() + 1)
}

/// Saves `message_id` for `user_id` under the next display number.
pub async fn create_bookmark(
    conn: &mut Connection,
    user_id: i64,
    message_id: i64,
) -> Result<Bookmark, DatabaseError> {
    let new = NewBookmark {
        user_id,
        user_bookmark_id: next_user_bookmark_id(conn, user_id).await?,
        message_id,
    };
    diesel::insert_into(bookmarks::table)
        .values(&new)
        .returning(Bookmark::as_returning())
        .get_result(conn)
        .await
        .map_err(|e| unique_violation(e, "bookmarks"))
}

pub async fn find_bookmark_by_message(
    conn: &mut Connection,
    user_id: i64,
    message_id: i64,
) -> Result<Option<Bookmark>, DatabaseError> {
    Ok(bookmarks::table
        .filter(bookmarks::user_id.eq(user_id))
        .filter(bookmarks::message_id.eq(message_id))
        .select(Bookmark::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// Finds a bookmark of `user_id` by display number (`12` or `#12`) or by alias.
pub async fn resolve_bookmark(
    conn: &mut Connection,
    user_id: i64,
    reference: &str,
) -> Result<Option<Bookmark>, DatabaseError> {
    let reference = reference.trim();
    let number = reference.strip_prefix('#').unwrap_or(reference);

    let mut query = bookmarks::table
        .filter(bookmarks::user_id.eq(user_id))
        .select(Bookmark::as_select())
        .into_boxed();
    query = if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        match number.parse::<i32>() {
            Ok(n) => query.filter(bookmarks::user_bookmark_id.eq(n)),
            Err(_) => return Ok(None), // out of range, can't exist
        }
    } else {
        query.filter(bookmarks::alias.eq(reference.to_lowercase()))
    };

    Ok(query.first(conn).await.optional()?)
}

/// Sets or clears the alias of the bookmark `id`.
pub async fn update_alias(
    conn: &mut Connection,
    id: i32,
    alias: Option<&str>,
) -> Result<Option<Bookmark>, DatabaseError> {
    use diesel::dsl::now;

    diesel::update(bookmarks::table.find(id))
        .set((bookmarks::alias.eq(alias), bookmarks::updated_at.eq(now)))
        .returning(Bookmark::as_returning())
        .get_result(conn)
        .await
        .optional()
        .map_err(|e| unique_violation(e, "bookmarks"))
}

/// Deletes the bookmark along with its tag links, then the cached message
/// when nothing else references it. Returns whether the message went too.
pub async fn delete_bookmark(
    conn: &mut Connection,
    bookmark: &Bookmark,
) -> Result<bool, DatabaseError> {
    use super::schema::bookmarks_tags;

    diesel::delete(bookmarks_tags::table.filter(bookmarks_tags::bookmark_id.eq(bookmark.id)))
        .execute(conn)
        .await?;
    let deleted = diesel::delete(bookmarks::table.find(bookmark.id))
        .execute(conn)
        .await?;
    if deleted == 0 {
        return Err(diesel::result::Error::NotFound.into());
    }

    message::delete_message_if_orphaned(conn, bookmark.message_id).await
}

fn unique_violation(e: diesel::result::Error, table: &str) -> DatabaseError {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DatabaseError::DuplicationError {
                table: table.to_string(),
            }
        }
        e => e.into(),
    }
}
