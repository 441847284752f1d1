use rocket::serde::json::Json;
use rocket_db_pools::Pool;
use serde_json::Value;
use tracing::debug;

use super::commands::{self, Command, Context};
use super::errors::Error;
use super::fairings::db::Db;
use super::guards;
use super::payload::{Interaction, PlatformUser, PING};
use super::reply::{InteractionResponse, MessagePayload};
use crate::db::user::upsert_user;
use crate::utils::CommonError;

/// Answers one interaction relayed from the chat platform.
#[post("/", format = "application/json", data = "<payload>")]
pub async fn interact(
    // Not a `Connection<Db>` guard: pings and rejected requests never check one out.
    db: &Db,
    _required: guards::Auth,
    payload: Json<Interaction>,
) -> Result<Json<InteractionResponse>, Error> {
    let interaction = payload.into_inner();
    if interaction.kind == PING {
        return Ok(Json(InteractionResponse::pong()));
    }

    let invoker = interaction
        .invoker()
        .and_then(PlatformUser::to_new_user)
        .ok_or_else(|| Error::BadRequest("Missing invoking user".to_string()))?;
    let command = Command::resolve(&interaction)
        .ok_or_else(|| Error::NotFound("Unknown command".to_string()))?;
    debug!(?command, user_id = invoker.id, "dispatching interaction");

    let mut conn = db.get().await?;
    let user = upsert_user(&mut conn, &invoker).await?;
    let mut ctx = Context {
        conn: &mut *conn,
        user: &user,
        interaction: &interaction,
    };

    match command.handler().handle(&mut ctx).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) if e.is_user_facing() => {
            debug!(?command, error = %e, "command rejected");
            Ok(Json(rejection(command, &e)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Buttons replace their own message, dropping the stale navigation row.
fn rejection(command: Command, error: &CommonError) -> InteractionResponse {
    match command {
        Command::SearchButton => {
            InteractionResponse::update(MessagePayload::text(error.to_string()).ephemeral())
        }
        _ => InteractionResponse::ephemeral(error.to_string()),
    }
}

/// Application commands to register on the platform.
#[get("/commands")]
pub async fn list_commands(_required: guards::Auth) -> Json<Vec<Value>> {
    Json(commands::command_definitions())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![interact, list_commands]
}
