use tracing::debug;

use super::{CommandHandler, Context, Reply};
use crate::db::tag::{toggle_bookmark_tag, upsert_tag};
use crate::search::validate::normalize_tag;
use crate::utils::CommonError;

pub struct Tag;

#[rocket::async_trait]
impl CommandHandler for Tag {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let raw = ctx.data().option_str("tag").unwrap_or_default().to_string();
        let bookmark = ctx.referenced_bookmark().await?;
        let name = normalize_tag(&raw)?;

        let tag = upsert_tag(ctx.conn, ctx.user.id, &name, false).await?;
        let attached = toggle_bookmark_tag(ctx.conn, &bookmark, &tag).await?;
        debug!(bookmark = bookmark.id, tag = %tag.name, attached, "toggled tag");

        Ok(Reply::ephemeral(if attached {
            format!("The tag `{}` was added to the bookmark.", tag.name)
        } else {
            format!("The tag `{}` was removed from the bookmark.", tag.name)
        }))
    }
}
