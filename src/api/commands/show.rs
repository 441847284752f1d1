use super::{CommandHandler, Context, Reply};
use crate::api::reply::{Embed, MessagePayload};
use crate::db;
use crate::utils::CommonError;

pub struct Show;

#[rocket::async_trait]
impl CommandHandler for Show {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let show_others = ctx.data().option_bool("show_others").unwrap_or(false);
        let bookmark = ctx.referenced_bookmark().await?;
        let detail = db::get_bookmark_detail(ctx.conn, bookmark).await?;

        let payload = MessagePayload::default().embed(Embed::from_bookmark(&detail));
        Ok(Reply::message(if show_others {
            payload
        } else {
            payload.ephemeral()
        }))
    }
}
