use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chat_log::{history_file, storage_root, ChatLog, Message, Sender};
use gemini_chat::commands::{parse_slash_command, SlashCommand};
use gemini_chat::credentials::CredentialStore;
use gemini_chat::frontend::SessionFrontend;
use gemini_chat::providers::provider_from_env;
use gemini_chat::session::{ChatSession, SessionStatus};
use time::OffsetDateTime;

const HELP_TEXT: &str = "Commands: /help, /key <key> [--remember], /clear, /export, /quit";

/// Environment variable overriding the storage base directory.
const HOME_ENV_VAR: &str = "GEMINI_CHAT_HOME";

struct StdoutFrontend;

impl SessionFrontend for StdoutFrontend {
    fn on_message_appended(&mut self, message: &Message) {
        // The user's own line is already on screen; only replies render.
        if message.sender == Sender::Bot {
            println!("gemini> {}", message.text);
        }
    }

    fn on_status_changed(&mut self, status: SessionStatus) {
        if status == SessionStatus::Sending {
            println!("…");
        }
    }

    fn on_credential_requested(&mut self) {
        println!("No API key configured. Set one with /key <key> [--remember].");
    }

    fn on_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let base = match std::env::var(HOME_ENV_VAR) {
        Ok(home) if !home.trim().is_empty() => PathBuf::from(home),
        _ => std::env::current_dir()?,
    };
    let root = storage_root(&base);
    std::fs::create_dir_all(&root)?;

    let log = ChatLog::open(&history_file(&root)).map_err(io::Error::other)?;
    let credentials = CredentialStore::load(&CredentialStore::credential_file(&root))
        .map_err(io::Error::other)?;
    let provider = provider_from_env().map_err(io::Error::other)?;

    let mut session = ChatSession::new(log, credentials);
    let mut frontend = StdoutFrontend;

    render_transcript(session.snapshot());
    if session.status() == SessionStatus::Uninitialized {
        frontend.on_credential_requested();
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_slash_command(&line) {
            Some(SlashCommand::Help) => println!("{HELP_TEXT}"),
            Some(SlashCommand::Clear) => match session.clear_log() {
                Ok(()) => println!("Conversation cleared."),
                Err(error) => frontend.on_error(&error.to_string()),
            },
            Some(SlashCommand::Export) => match session.export_log() {
                Ok(contents) => match write_export(&contents) {
                    Ok(path) => println!("Exported to {}", path.display()),
                    Err(error) => frontend.on_error(&error.to_string()),
                },
                Err(error) => frontend.on_error(&error.to_string()),
            },
            Some(SlashCommand::Key { key, remember }) => {
                match session.set_credential(&key, remember, &mut frontend) {
                    Ok(()) => println!("API key saved."),
                    Err(error) => frontend.on_error(&error.to_string()),
                }
            }
            Some(SlashCommand::Quit) => break,
            Some(SlashCommand::Unknown(command)) => println!("Unknown command: {command}"),
            None => session.submit(&line, provider.as_ref(), &mut frontend).await,
        }
    }

    Ok(())
}

fn render_transcript(messages: &[Message]) {
    for message in messages {
        let label = match message.sender {
            Sender::User => "you",
            Sender::Bot => "gemini",
        };
        println!("{label}> {}", message.text);
    }
}

fn write_export(contents: &str) -> io::Result<PathBuf> {
    let now = OffsetDateTime::now_utc();
    let path = PathBuf::from(format!(
        "gemini-chat-{:04}-{:02}-{:02}.txt",
        now.year(),
        u8::from(now.month()),
        now.day()
    ));
    std::fs::write(&path, contents)?;

    Ok(path)
}
