use msgmark::api::configs::{self, Config};
use msgmark::utils::logging;

#[rocket::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    let config: Config = configs::config_provider().extract()?;
    let _guard = logging::setup_log(config.log_dir.as_deref());

    let _ = msgmark::rocket().await?.launch().await?;
    Ok(())
}
