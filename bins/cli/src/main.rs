//! Member statement terminal.
//!
//! Reads one command per line from stdin and prints the resulting notice.

mod render;
mod repl;

use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statement_core::assets::AssetStore;
use statement_gateway::HttpGateway;
use statement_session::{Command, Notice, StatementSession};
use statement_shared::AppConfig;

use crate::repl::{LineAction, parse_line};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the table on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statement=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    let gateway = HttpGateway::new(config.api.clone())?;
    info!(base_url = %config.api.base_url, "Statement backend configured");

    let mut session = StatementSession::new(gateway, &config.export);
    match AssetStore::from_config(&config.assets) {
        Ok(store) => {
            info!(provider = store.provider_name(), "Asset store configured");
            session = session.with_assets(store);
        }
        Err(e) => warn!(error = %e, "Asset store unavailable, exports will have no template"),
    }

    let output_dir = config.export.output_dir.clone();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(repl::help().as_bytes()).await?;
    loop {
        stdout.write_all(b"statement> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                // Covers `help` as well as usage errors
                stdout.write_all(e.render().to_string().as_bytes()).await?;
                continue;
            }
        };

        match action {
            LineAction::Quit => break,
            LineAction::Show => show(&mut stdout, &session).await?,
            LineAction::Member(profile) => {
                let notice = session.select_member(profile).await;
                print(&mut stdout, &notice).await?;
                show(&mut stdout, &session).await?;
            }
            LineAction::Period(period) => {
                let notice = session.set_period(period).await;
                print(&mut stdout, &notice).await?;
            }
            LineAction::Act { row, action, reason } => {
                let notice = match repl::row_command(session.table(), row, action, reason) {
                    Ok(command) => run(&mut session, command, &output_dir).await,
                    Err(e) => Notice::warning(e.to_string()),
                };
                print(&mut stdout, &notice).await?;
            }
            LineAction::Dispatch(command) => {
                let refresh = matches!(command, Command::Sort | Command::Reload);
                let notice = run(&mut session, command, &output_dir).await;
                print(&mut stdout, &notice).await?;
                if refresh {
                    show(&mut stdout, &session).await?;
                }
            }
        }
    }

    Ok(())
}

/// Dispatches a command; a generated export is also written to `output_dir`.
async fn run(session: &mut StatementSession<HttpGateway>, command: Command, output_dir: &Path) -> Notice {
    let exporting = matches!(command, Command::GeneratePdf);
    let notice = session.dispatch(command).await;
    if !exporting || !notice.is_info() {
        return notice;
    }
    let Some(artifact) = session.artifact() else {
        return notice;
    };

    let path = output_dir.join(artifact.file_name());
    let written = async {
        tokio::fs::create_dir_all(output_dir).await?;
        tokio::fs::write(&path, artifact.bytes()).await
    }
    .await;
    match written {
        Ok(()) => Notice::info(format!("{}; saved to {}", notice.message, path.display())),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not save statement");
            Notice::warning(format!("{}; could not save to {}: {e}", notice.message, path.display()))
        }
    }
}

async fn print(stdout: &mut tokio::io::Stdout, notice: &Notice) -> std::io::Result<()> {
    stdout.write_all(format!("{notice}\n").as_bytes()).await
}

async fn show(stdout: &mut tokio::io::Stdout, session: &StatementSession<HttpGateway>) -> std::io::Result<()> {
    let text = render::session_view(session.member(), session.period(), session.table());
    stdout.write_all(text.as_bytes()).await
}
