use diesel_async::{AsyncConnection, AsyncPgConnection};

use crate::api::configs;

/// Logs every statement run through `conn`, and the failing ones as errors.
pub fn instrument(conn: &mut AsyncPgConnection) {
    use diesel::connection::InstrumentationEvent;

    conn.set_instrumentation(|event: InstrumentationEvent<'_>| match event {
        InstrumentationEvent::StartQuery { query, .. } => {
            tracing::info!("Executing query: {}", query);
        }
        InstrumentationEvent::FinishQuery { query, error, .. } => match error {
            Some(e) => tracing::error!("Query failed: {}\nError: {:?}", query, e),
            None => tracing::debug!("Executing query succeeded: {}", query),
        },
        _ => {}
    });
}

pub async fn establish() -> AsyncPgConnection {
    let url = configs::get_database_url();

    let mut conn = AsyncPgConnection::establish(&url)
        .await
        .unwrap_or_else(|_| panic!("Error connecting database"));

    if cfg!(debug_assertions) {
        instrument(&mut conn);
    }

    conn
}

pub async fn run_migrations() -> anyhow::Result<()> {
    use anyhow::anyhow;
    use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
    let conn = establish().await;

    let mut async_wrapper: AsyncConnectionWrapper<AsyncPgConnection> =
        AsyncConnectionWrapper::from(conn);

    tokio::task::spawn_blocking(move || {
        async_wrapper
            .run_pending_migrations(MIGRATIONS)
            .map(|applied| tracing::info!(count = applied.len(), "applied migrations"))
            .map_err(|e| anyhow!("failed to run migrations: {}", e))
    })
    .await?
}
