use tracing::debug;

use super::{CommandHandler, Context, Reply};
use crate::api::payload::InteractionData;
use crate::api::reply::{self, Direction, SearchButtonId};
use crate::db;
use crate::search::{filter_and_select, parse_tag_prefixes, Navigation, SearchQuery};
use crate::utils::CommonError;

pub struct Search;
pub struct SearchButton;

/// Backticks would break the query quoted in the results message.
fn sanitize_query(raw: &str) -> String {
    raw.replace(['`', '\n'], "").trim().to_string()
}

fn button_navigation(data: &InteractionData) -> Result<Navigation, CommonError> {
    let button = data
        .custom_id
        .as_deref()
        .and_then(SearchButtonId::decode)
        .ok_or(CommonError::NotFound)?;
    Ok(match button.mode {
        Direction::Forward => Navigation::Forward(button.index),
        Direction::Back => Navigation::Back(button.index),
    })
}

async fn run_search(
    ctx: &mut Context<'_>,
    query: &SearchQuery,
    navigation: Navigation,
) -> Result<reply::MessagePayload, CommonError> {
    let bookmarks = db::load_user_bookmarks(ctx.conn, ctx.user.id).await?;
    let page = filter_and_select(&bookmarks, query, navigation)?;
    debug!(
        user_id = ctx.user.id,
        selected = page.selected.bookmark.user_bookmark_id,
        total = page.len(),
        "search page"
    );
    Ok(reply::search_page(query, &page))
}

#[rocket::async_trait]
impl CommandHandler for Search {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let data = ctx.data();
        let raw = sanitize_query(data.option_str("query").unwrap_or_default());
        let tags = data.option_str("tags").unwrap_or_default().to_string();

        let query = parse_tag_prefixes(&raw).with_tags(tags.split(' '));
        let payload = run_search(ctx, &query, Navigation::Initial).await?;
        Ok(Reply::message(payload))
    }
}

#[rocket::async_trait]
impl CommandHandler for SearchButton {
    async fn handle(&self, ctx: &mut Context<'_>) -> Result<Reply, CommonError> {
        let navigation = button_navigation(ctx.data())?;
        let content = ctx
            .interaction
            .message
            .as_ref()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let query = parse_tag_prefixes(reply::extract_query(content).unwrap_or_default());

        let payload = run_search(ctx, &query, navigation).await?;
        Ok(Reply::update(payload))
    }
}
