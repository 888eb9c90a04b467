//! work-diary: turn one author's git history into a day-by-day work log
//!
//! This binary collects the commits of one author over a date window and
//! writes them, grouped by day, into a Markdown document in the project root.

use std::io;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::debug;
use work_diary::config::Config;
use work_diary::diary::{self, Outcome};
use work_diary::prompt::{self, Defaults};
use work_diary_git::GitConfigIdentity;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut config = Config::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let today = Local::now().date_naive();

    if config.interactive {
        let defaults = Defaults {
            author: config.author.clone(),
            since: config.since_or_default(today),
            until: config.until_or_default(today),
        };
        let answers = prompt::ask(&mut io::stdin().lock(), &mut io::stderr(), &defaults, config.locale)
            .context("Failed to read answers")?;
        config.apply_answers(answers);
    }

    config.validate(today)?;
    let request = config.request(today)?;
    debug!(?request, "Resolved request");

    let identity = GitConfigIdentity::for_repo(&request.workspace);
    match diary::run(&request, &identity).await? {
        Outcome::Written { path, entries } => {
            println!("Wrote {entries} entries to {}", path.display());
        }
        Outcome::Printed { document, .. } => {
            print!("{document}");
        }
        Outcome::NoCommits {
            author,
            since,
            until,
        } => {
            println!("No commits found for {author} between {since} and {until}");
        }
    }

    Ok(())
}
