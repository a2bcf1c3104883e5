use anyhow::Context;
use clap::{Parser, Subcommand};
use reels_ideas::api::OpenAiClient;
use reels_ideas::config::{Overrides, Settings};
use reels_ideas::credentials::API_KEY_KEY;
use reels_ideas::presentation::{
    render_details, render_summary, sorted_newest_first, AssumeYes, Confirm, FileClipboard,
    IdeaHistory, StdinConfirm, StdoutClipboard,
};
use reels_ideas::progress::{with_progress, ProgressTracker};
use reels_ideas::{IdeaError, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "reels-ideas")]
#[command(about = "Instagram Reels idea generator using AI", long_about = None)]
struct Cli {
    /// OpenAI API key (takes precedence over OPENAI_API_KEY and the saved key)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model to query, repeat for several (default: gpt-4o and gpt-4o-mini)
    #[arg(short, long = "model", global = true)]
    models: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Sampling temperature
    #[arg(long, global = true)]
    temperature: Option<f64>,

    /// Settings file holding the saved API key
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate ideas for a topic and print them
    Generate {
        /// Topic of the Reels video
        #[arg(short, long)]
        topic: String,

        /// Print the ideas as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the newest idea as plain text to this file
        #[arg(long)]
        copy_to: Option<PathBuf>,
    },

    /// Interactive session: generate, browse, copy and delete ideas
    Session {
        /// Skip delete confirmations
        #[arg(short, long)]
        yes: bool,
    },

    /// Save the API key to the settings file
    SetKey {
        key: String,
    },

    /// Remove the saved API key
    ClearKey,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::resolve(Overrides {
        api_key: cli.api_key,
        base_url: cli.base_url,
        models: cli.models,
        timeout_secs: cli.timeout,
        temperature: cli.temperature,
        settings_path: cli.settings,
    })
    .context("Failed to load settings")?;

    match cli.command {
        Command::SetKey { key } => {
            settings
                .credential_store()
                .save_api_key(&key)
                .context("Failed to save API key")?;
            println!("API key saved to {}", settings.settings_path.display());
        }
        Command::ClearKey => {
            let removed = settings
                .credential_store()
                .remove(API_KEY_KEY)
                .context("Failed to update settings")?;
            if removed {
                println!("API key removed");
            } else {
                println!("No API key was saved");
            }
        }
        Command::Generate {
            topic,
            json,
            copy_to,
        } => {
            let session = build_session(&settings)?;
            if let Err(e) = run_generate(&session, &settings, &topic).await {
                error!("Generation failed: {}", e);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            print_ideas(&session, json)?;
            if let Some(path) = copy_to {
                copy_newest(&session, path)?;
            }
        }
        Command::Session { yes } => {
            let session = build_session(&settings)?;
            let mut confirm: Box<dyn Confirm> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(StdinConfirm)
            };
            run_session(&session, &settings, confirm.as_mut()).await?;
        }
    }

    Ok(())
}

fn build_session(settings: &Settings) -> anyhow::Result<Session> {
    let client = OpenAiClient::new(settings.base_url.clone(), settings.timeout)
        .context("Failed to create API client")?;
    Ok(Session::new(Arc::new(client), settings.models.clone()).with_temperature(settings.temperature))
}

async fn run_generate(session: &Session, settings: &Settings, topic: &str) -> reels_ideas::Result<usize> {
    // The key is read fresh for every attempt
    let api_key = settings.api_key()?;

    let count = with_progress(session.generate(topic, api_key), render_progress).await;
    eprintln!();
    let count = count?;

    if count == 0 {
        eprintln!("The model did not return any usable ideas, try again");
    }
    info!("Generated {} idea(s)", count);
    Ok(count)
}

fn render_progress(tracker: &ProgressTracker) {
    eprint!("\r{:>3.0}% - {:<30}", tracker.percent(), tracker.message());
    let _ = io::stderr().flush();
}

fn print_ideas(session: &Session, json: bool) -> anyhow::Result<()> {
    let ideas = session.ideas();
    let sorted = sorted_newest_first(&ideas);

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    for (i, idea) in sorted.iter().enumerate() {
        println!("{}", render_summary(i + 1, idea));
        print!("{}", render_details(idea));
    }
    Ok(())
}

fn copy_newest(session: &Session, path: PathBuf) -> anyhow::Result<()> {
    let ideas = session.ideas();
    let Some(newest) = sorted_newest_first(&ideas).first().copied() else {
        eprintln!("No idea to copy");
        return Ok(());
    };

    let mut clipboard = FileClipboard::new(&path);
    IdeaHistory::new()
        .copy(newest, &mut clipboard)
        .with_context(|| format!("Failed to copy idea to {}", path.display()))?;
    Ok(())
}

#[derive(Debug, PartialEq)]
enum SessionCommand {
    Generate(String),
    List,
    Show(usize),
    Copy(usize),
    Delete(usize),
    Clear,
    Export(PathBuf),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let position = |rest: &str| -> Result<usize, String> {
        rest.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("Expected an idea number, got '{}'", rest))
    };

    match word {
        "generate" | "g" => Ok(SessionCommand::Generate(rest.to_string())),
        "list" | "ls" => Ok(SessionCommand::List),
        "show" => position(rest).map(SessionCommand::Show),
        "copy" => position(rest).map(SessionCommand::Copy),
        "delete" | "rm" => position(rest).map(SessionCommand::Delete),
        "clear" => Ok(SessionCommand::Clear),
        "export" if !rest.is_empty() => Ok(SessionCommand::Export(PathBuf::from(rest))),
        "export" => Err("Usage: export <file>".to_string()),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        "" => Ok(SessionCommand::List),
        other => Err(format!("Unknown command '{}', type 'help'", other)),
    }
}

const HELP: &str = "Commands:
  generate <topic>  generate new ideas (replaces the current list)
  list              list ideas, newest first
  show <n>          expand or collapse idea n
  copy <n>          print idea n as plain text
  delete <n>        delete idea n
  clear             delete all ideas
  export <file>     save ideas as JSON
  quit              leave the session";

/// Id of the idea at 1-based `position` in newest-first order
fn idea_at(session: &Session, position: usize) -> Option<Uuid> {
    let ideas = session.ideas();
    sorted_newest_first(&ideas)
        .get(position - 1)
        .map(|idea| idea.id)
}

fn print_history(session: &Session, history: &IdeaHistory) {
    let ideas = session.ideas();
    if ideas.is_empty() {
        println!("No ideas yet. Try: generate <topic>");
        return;
    }

    println!("Idea history ({})", ideas.len());
    for (i, idea) in sorted_newest_first(&ideas).iter().enumerate() {
        println!("{}", render_summary(i + 1, idea));
        if history.is_open(idea.id) {
            print!("{}", render_details(idea));
        }
    }
}

async fn run_session(
    session: &Session,
    settings: &Settings,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let mut history = IdeaHistory::new();
    let mut clipboard = StdoutClipboard;
    println!("{}", HELP);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match command {
            SessionCommand::Generate(topic) => match run_generate(session, settings, &topic).await {
                Ok(_) => {
                    history.close();
                    print_history(session, &history);
                }
                Err(e @ (IdeaError::Validation(_) | IdeaError::MissingCredential | IdeaError::Busy)) => {
                    eprintln!("{}", e);
                }
                Err(e) => {
                    error!("Content generation error: {}", e);
                    eprintln!("Something went wrong while generating ideas");
                }
            },
            SessionCommand::List => print_history(session, &history),
            SessionCommand::Show(n) => match idea_at(session, n) {
                Some(id) => {
                    history.toggle(id);
                    print_history(session, &history);
                }
                None => eprintln!("No idea #{}", n),
            },
            SessionCommand::Copy(n) => {
                let idea = idea_at(session, n).and_then(|id| session.store().get(id).cloned());
                match idea {
                    Some(idea) => {
                        if let Err(e) = history.copy(&idea, &mut clipboard) {
                            eprintln!("Copy failed: {}", e);
                        }
                    }
                    None => eprintln!("No idea #{}", n),
                }
            }
            SessionCommand::Delete(n) => match idea_at(session, n) {
                Some(id) => {
                    let mut store = session.store();
                    if history.delete(&mut store, id, confirm) {
                        println!("Idea deleted");
                    }
                }
                None => eprintln!("No idea #{}", n),
            },
            SessionCommand::Clear => {
                let mut store = session.store();
                if history.delete_all(&mut store, confirm) {
                    println!("Idea history cleared");
                }
            }
            SessionCommand::Export(path) => {
                let ideas = session.ideas();
                let text = serde_json::to_string_pretty(&sorted_newest_first(&ideas))?;
                match tokio::fs::write(&path, text).await {
                    Ok(()) => println!("Exported {} idea(s) to {}", ideas.len(), path.display()),
                    Err(e) => eprintln!("Export failed: {}", e),
                }
            }
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}
