use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::AsyncConnection;
use tracing::info;

use super::{CommandHandler, Context, Reply};
use crate::db::bookmark::delete_bookmark;
use crate::utils::CommonError;

pub struct Delete;

#[rocket::async_trait]
impl CommandHandler for Delete {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let bookmark = ctx.referenced_bookmark().await?;

        let message_deleted = ctx
            .conn
            .transaction::<_, CommonError, _>(|conn| {
                async move { Ok(delete_bookmark(conn, &bookmark).await?) }.scope_boxed()
            })
            .await?;
        info!(
            user_id = ctx.user.id,
            message_deleted, "deleted bookmark"
        );

        Ok(Reply::ephemeral("The bookmark has been deleted."))
    }
}
