use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use teller_engine::{Engine, SessionSnapshot, SessionStore, UserId};

use crate::adapter::{self, Inbound};

pub fn run(
    dir: &Path,
    chat: i64,
    sessions: Option<&Path>,
    config: Option<&Path>,
) -> Result<(), String> {
    let catalog = Arc::new(super::load_catalog(dir)?);
    let config = super::load_config(config)?;

    let store = match sessions {
        Some(path) if path.exists() => {
            let snapshot = SessionSnapshot::load_json(path)
                .map_err(|e| format!("cannot load sessions from {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), sessions = snapshot.len(), "restoring sessions");
            SessionStore::from_snapshot(snapshot)
        }
        _ => SessionStore::new(),
    };

    let engine = Engine::with_sessions(catalog, config, store);
    let pruned = engine.prune_stale_sessions();
    if pruned > 0 {
        tracing::warn!(pruned, "cleared sessions that no longer match the stories");
    }

    let default_chat = UserId(chat);
    println!(
        "  {} Teller with {} stories",
        "Starting".bold(),
        engine.catalog().len()
    );
    println!("  Send /start to begin. Prefix a line with '@<id> ' to speak as another chat.\n");

    let stdin = io::stdin();
    serve(&engine, default_chat, stdin.lock(), sessions)
}

/// Run the conversation, then save sessions even if it ended in an error.
fn serve(
    engine: &Engine,
    default_chat: UserId,
    input: impl BufRead,
    sessions: Option<&Path>,
) -> Result<(), String> {
    let outcome = converse(engine, default_chat, input);
    let saved = match sessions {
        Some(path) => save_sessions(engine, path),
        None => Ok(()),
    };
    outcome.and(saved)
}

fn converse(engine: &Engine, default_chat: UserId, mut reader: impl BufRead) -> Result<(), String> {
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => return Ok(()), // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim_end_matches(['\n', '\r']);
        if input.is_empty() {
            continue;
        }

        let message = adapter::route(input);
        let user = message.chat.unwrap_or(default_chat);
        let result = match message.inbound {
            Inbound::Start => engine.start(user),
            Inbound::Text(text) => engine
                .on_user_choice(user, &text)
                .map_err(|e| e.to_string())?,
        };

        let reply = adapter::render(&result, &engine.config().reset_keyword);
        if user != default_chat {
            println!("{}", format!("[chat {user}]").dimmed());
        }
        if result.is_error() {
            println!("{}", reply.text.yellow());
        } else {
            println!("{}", reply.text);
        }
        for label in reply.keyboard.iter().flatten() {
            println!("  [{}]", label.cyan());
        }
        println!();
    }
}

fn save_sessions(engine: &Engine, path: &Path) -> Result<(), String> {
    engine
        .sessions()
        .snapshot()
        .save_json(path)
        .map_err(|e| format!("cannot save sessions to {}: {e}", path.display()))?;
    println!("  Saved {} sessions to {}", engine.sessions().len(), path.display());
    Ok(())
}
