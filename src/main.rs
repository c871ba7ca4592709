use clap::Parser;
use tracing_subscriber::EnvFilter;

use pr_pick::app::{self, Deps, Outcome};
use pr_pick::browser::SystemBrowser;
use pr_pick::cancel::{Cancellation, KeyListener};
use pr_pick::git::GitCli;
use pr_pick::github::{GitHubClient, Mode};
use pr_pick::output::print_error;
use pr_pick::selector::TerminalSelector;

#[derive(Parser, Debug)]
#[command(name = "pr-pick")]
#[command(about = "Check out or open one of your open pull requests", long_about = None)]
#[command(version)]
struct Cli {
    /// Show what I have to review
    #[arg(short = 'r', long)]
    to_review: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(pr_pick::stderr_buffer::writer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let mode = Mode::from_flag(cli.to_review);
    let cancel = Cancellation::new();
    // The escape listener runs from here until the picker is done with it
    let mut selector = TerminalSelector::new(KeyListener::spawn(cancel.clone()));
    let git = GitCli::new();

    let result = app::run(
        mode,
        Deps {
            store: &git,
            vcs: &git,
            browser: &SystemBrowser,
            selector: &mut selector,
            cancel: &cancel,
        },
        GitHubClient::connect,
    )
    .await;

    match &result {
        Ok(Outcome::NothingFound) => println!("No open PRs found, exiting."),
        Ok(Outcome::Cancelled) => println!("Cancelled."),
        Ok(Outcome::Viewed(_)) | Ok(Outcome::CheckedOut(_)) => {}
        Err(e) if app::is_missing_api_key(e) => println!("{}", e),
        Err(e) => print_error(&format!("{:#}", e)),
    }

    std::process::exit(app::exit_code(&result));
}
