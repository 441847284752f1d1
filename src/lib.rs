#[macro_use]
extern crate rocket;

pub mod api;
pub mod db;
pub mod search;
pub mod utils;

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
#[ctor::ctor]
fn init() {
    crate::utils::logging::setup_console_log();
}

/// Builds the server: embedded migrations are applied first, then the
/// interaction routes are mounted under `/interactions`.
#[cfg(not(tarpaulin_include))]
pub async fn rocket() -> anyhow::Result<rocket::Rocket<rocket::Build>> {
    use rocket::fairing::AdHoc;
    use rocket_db_pools::Database;

    use crate::api::configs::{self, Config};
    use crate::api::fairings::db::Db;
    use crate::api::interaction;

    crate::db::connection::run_migrations().await?;

    Ok(rocket::custom(configs::config_provider())
        .attach(Db::init())
        .mount("/interactions", interaction::routes())
        .attach(AdHoc::config::<Config>()))
}
