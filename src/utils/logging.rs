use tracing_appender::non_blocking::WorkerGuard;

pub fn setup_console_log() {
    setup_log(None);
}

/// Console logging, plus a daily rolling file under `log_dir` when given.
///
/// The returned guard flushes the file writer on drop, so keep it alive for
/// as long as the process runs.
pub fn setup_log(log_dir: Option<&str>) -> Option<WorkerGuard> {
    use std::io;
    use tracing_subscriber::{prelude::*, EnvFilter};

    let console_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(io::stdout)
        .boxed();
    let mut layers = vec![console_log];

    let guard = log_dir.map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "msgmark.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
        guard
    });

    tracing_subscriber::registry()
        .with(layers)
        .with(EnvFilter::from_default_env())
        .init();

    guard
}
