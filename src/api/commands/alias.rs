use tracing::debug;

use super::{CommandHandler, Context, Reply};
use crate::db::bookmark::{resolve_bookmark, update_alias};
use crate::search::validate::normalize_alias;
use crate::utils::{CommonError, DatabaseError, ValidationError};

pub struct Alias;

/// The alias to store, `None` to clear it.
///
/// Repeating the current alias clears it as well.
fn requested_alias(
    raw: Option<&str>,
    current: Option<&str>,
) -> Result<Option<String>, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() || current.is_some_and(|c| c.eq_ignore_ascii_case(raw)) {
        return Ok(None);
    }
    normalize_alias(raw).map(Some)
}

#[rocket::async_trait]
impl CommandHandler for Alias {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let raw = ctx.data().option_str("new_alias").map(str::to_string);
        let bookmark = ctx.referenced_bookmark().await?;
        let alias = requested_alias(raw.as_deref(), bookmark.alias.as_deref())?;

        if let Some(alias) = alias.as_deref() {
            if resolve_bookmark(ctx.conn, ctx.user.id, alias)
                .await?
                .is_some_and(|other| other.id != bookmark.id)
            {
                return Err(ValidationError::DuplicatedAlias.into());
            }
        }

        let updated = match update_alias(ctx.conn, bookmark.id, alias.as_deref()).await {
            Ok(updated) => updated.ok_or(CommonError::NotFound)?,
            // lost a race against another alias command
            Err(DatabaseError::DuplicationError { .. }) => {
                return Err(ValidationError::DuplicatedAlias.into())
            }
            Err(e) => return Err(e.into()),
        };
        debug!(bookmark = updated.id, alias = ?updated.alias, "updated alias");

        Ok(Reply::ephemeral(match updated.alias {
            Some(alias) => format!("The alias `{}` was set on the bookmark.", alias),
            None => "The alias was removed from the bookmark.".to_string(),
        }))
    }
}
