//! Terminal client entry point.
mod app;
mod input;
mod terminal;
mod ui;
mod world;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal is owned by the UI; logs go to a file instead.
    let appender = tracing_appender::rolling::daily("logs", "battle-client.log");
    let (writer, _log_guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut tui = terminal::init()?;
    let _guard = terminal::TerminalGuard;

    let result = app::App::new().run(&mut tui).await;

    terminal::restore()?;
    result
}
