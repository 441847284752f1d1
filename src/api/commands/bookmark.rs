use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::AsyncConnection;
use tracing::info;

use super::{CommandHandler, Context, Reply};
use crate::api::payload::parse_snowflake;
use crate::db::bookmark::{create_bookmark, find_bookmark_by_message};
use crate::db::message::{upsert_message, NewMessage};
use crate::db::tag::{attach_tags, upsert_tags};
use crate::db::user::upsert_user;
use crate::utils::{CommonError, DatabaseError};

/// Message context menu entry saving the target message.
pub struct BookmarkMessage;

#[rocket::async_trait]
impl CommandHandler for BookmarkMessage {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let target = ctx
            .data()
            .target_message()
            .cloned()
            .ok_or(CommonError::MissingTarget)?;
        let author = target
            .author
            .to_new_user()
            .ok_or(CommonError::MissingTarget)?;
        let message_id = parse_snowflake(&target.message.id).ok_or(CommonError::MissingTarget)?;
        let new_message = NewMessage::new(message_id, author.id, &target.message).map_err(
            |source| DatabaseError::MalformedMessage {
                id: message_id,
                source,
            },
        )?;
        let user_id = ctx.user.id;

        let (bookmark, created) = ctx
            .conn
            .transaction::<_, CommonError, _>(|conn| {
                async move {
                    if let Some(existing) =
                        find_bookmark_by_message(conn, user_id, message_id).await?
                    {
                        return Ok((existing, false));
                    }

                    upsert_user(conn, &author).await?;
                    upsert_message(conn, &new_message).await?;
                    let bookmark = create_bookmark(conn, user_id, message_id).await?;

                    let names = target.message.autogenerated_tags();
                    let tags = upsert_tags(conn, user_id, &names, true).await?;
                    attach_tags(conn, &bookmark, &tags).await?;
                    Ok((bookmark, true))
                }
                .scope_boxed()
            })
            .await?;
        info!(
            user_id,
            message_id,
            user_bookmark_id = bookmark.user_bookmark_id,
            created,
            "bookmarked message"
        );

        Ok(Reply::ephemeral(if created {
            format!(
                "The message was bookmarked as #{}.",
                bookmark.user_bookmark_id
            )
        } else {
            format!(
                "This message is already bookmarked as #{}.",
                bookmark.user_bookmark_id
            )
        }))
    }
}
