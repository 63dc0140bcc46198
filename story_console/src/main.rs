//! Terminal chat shell for the narrative engine.
//!
//! Each line read from stdin is one chat message from a single user. Replies
//! go to stdout, logs to stderr.

mod reply;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use narrative_core::{NarrativeEngine, UserId};
use story_rules::{ConfigError, ContentError, StoryConfig, StoryGraph};

use reply::{Renderer, Reply};

#[derive(Parser)]
#[command(
    name = "story",
    about = "Play a branching story as a chat in the terminal",
    version
)]
struct Cli {
    /// JSON file mapping scene ids to scenes
    #[arg(short, long)]
    story: PathBuf,

    /// TOML configuration (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// User id the messages are sent as
    #[arg(short, long, default_value = "local")]
    user: String,

    /// Print replies as JSON, one per line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum ConsoleError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ConsoleError> {
    let config = match &cli.config {
        Some(path) => StoryConfig::load(path)?,
        None => StoryConfig::default(),
    };
    let graph = StoryGraph::load(&cli.story)?;

    let dangling = graph.dangling_targets();
    if !dangling.is_empty() {
        tracing::warn!(
            count = dangling.len(),
            first = %dangling[0],
            "some edges lead to scenes that do not exist; reaching them ends the story"
        );
    }
    for (ending, scene) in graph.missing_endings(&config.endings) {
        tracing::warn!(
            ending = %ending,
            scene = %scene,
            "ending scene is not in the story graph; reaching it ends the story"
        );
    }

    let engine = NarrativeEngine::in_memory(graph, &config);
    let renderer = Renderer::new(&config.messages, engine.advance_token());
    let user = UserId::new(cli.user.clone());

    tracing::info!(user_id = %user, "ready, type a message (:session to inspect, :quit to leave)");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let input = line?;
        // Checked before the engine sees the line, so a choice whose value is
        // ":quit" or ":session" cannot be picked from this shell.
        match input.as_str() {
            ":quit" => break,
            ":session" => {
                match engine.session_snapshot(&user) {
                    Some(session) => writeln!(out, "{}", serde_json::to_string_pretty(&session)?)?,
                    None => writeln!(out, "(no session)")?,
                }
                continue;
            }
            _ => {}
        }

        let result = engine.advance(&user, &input);
        if let Some(reply) = renderer.render(&result) {
            write_reply(&mut out, &reply, cli.json)?;
        }
        out.flush()?;
    }

    Ok(())
}

fn write_reply(out: &mut impl Write, reply: &Reply, json: bool) -> Result<(), ConsoleError> {
    if json {
        writeln!(out, "{}", serde_json::to_string(reply)?)?;
        return Ok(());
    }

    writeln!(out, "{}", reply.text)?;
    for quick in &reply.quick_replies {
        if quick.label == quick.text {
            writeln!(out, "  [{}]", quick.label)?;
        } else {
            writeln!(out, "  [{}] -> {}", quick.label, quick.text)?;
        }
    }
    writeln!(out)?;
    Ok(())
}
