use rocket::{
    figment::Figment,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Config {
    /// Expected `Authorization` header of the interaction relay.
    pub api_key: Option<String>,
    /// Directory of the daily rolling log files.
    pub log_dir: Option<String>,
}

pub fn config_provider() -> Figment {
    use rocket::figment::providers::{Env, Serialized};

    dotenvy::dotenv().ok();

    rocket::figment::Figment::from(rocket::Config::default())
        .merge(Serialized::defaults(Config::default()))
        .merge(("databases.main", rocket_db_pools::Config::default()))
        .merge(Env::prefixed("MM_").global())
}

pub fn get_database_url() -> String {
    config_provider()
        .extract_inner("databases.main.url")
        .expect("databases.main.url must be set, e.g. MM_DATABASES='{main={url=\"postgres://...\"}}'")
}
