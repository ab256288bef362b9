use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::debug;
use std::env;

mod chat_view;

use setlist::adapter::{ChatMessage, EventKind, InboundEvent, MemoryTransport, WorkoutBot};
use setlist::catalog::{self, DayCode};
use setlist::logging;
use setlist::session::{ChatId, UserId};

const LOG_ENV: &str = "SETLIST_LOG";

#[derive(Parser, Debug)]
#[command(version, about = "Setlist - guided workout sessions", long_about = None)]
struct Args {
    /// off, error, warn, info, debug or trace (falls back to $SETLIST_LOG)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a workout in an interactive chat view
    Interactive {
        #[arg(short, long, default_value_t = 1)]
        user: i64,
    },
    /// Press buttons from a script and print the resulting chat
    Replay {
        /// Day code (day1..day5) or its menu label
        #[arg(short, long)]
        day: String,
        /// Button labels in order, comma separated, e.g. "Done,Skip,Yes"
        #[arg(short, long, value_delimiter = ',')]
        presses: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the built-in day templates
    Templates {
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(level: Option<String>, default: Option<&str>) -> Result<()> {
    let level = level.or_else(|| env::var(LOG_ENV).ok());
    let Some(level) = level.as_deref().or(default) else {
        return Ok(());
    };
    if !logging::set_log_level(level) {
        bail!("unknown log level {:?}", level);
    }
    Ok(())
}

fn resolve_day(day: &str) -> Result<DayCode> {
    if let Some(code) = DayCode::from_label(day) {
        return Ok(code);
    }
    day.parse::<DayCode>()
        .with_context(|| format!("expected day1..day5 or a day label, got {:?}", day))
}

async fn press(
    bot: &WorkoutBot<MemoryTransport>,
    user: UserId,
    chat: ChatId,
    label: &str,
) -> Result<()> {
    let message = bot
        .transport()
        .latest_with_choices(chat)
        .await
        .context("no message with buttons to press")?;
    let Some(choice) = message.choice(label) else {
        let available: Vec<_> = message.choices.iter().map(|c| c.label.as_str()).collect();
        bail!(
            "no {:?} button on {:?} (available: {})",
            label,
            message.text,
            available.join(", ")
        );
    };
    bot.handle_callback(user, chat, message.id, &choice.data)
        .await
}

fn print_message(message: &ChatMessage) {
    let edited = if message.edited { " (edited)" } else { "" };
    println!("[{}]{} {}", message.id, edited, message.text.replace('\n', "\n    "));
    if !message.choices.is_empty() {
        let labels: Vec<_> = message
            .choices
            .iter()
            .map(|c| format!("[{}]", c.label))
            .collect();
        println!("    {}", labels.join(" "));
    }
}

async fn replay(day: &str, presses: &[String], json: bool) -> Result<()> {
    let user = UserId(1);
    let chat = ChatId(1);
    let bot = WorkoutBot::new(MemoryTransport::new());
    let day = resolve_day(day)?;
    debug!("Replaying {} with {} presses", day, presses.len());

    bot.handle(InboundEvent::new(user, chat, EventKind::StartWorkout))
        .await?;
    press(&bot, user, chat, day.label()).await?;
    for label in presses {
        press(&bot, user, chat, label.trim()).await?;
    }

    let messages = bot.transport().messages().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    for message in &messages {
        print_message(message);
    }
    if let Some(session) = bot.engine().store().get(user).await {
        println!(
            "-- session still open: {} at exercise {}/{}, {} logged",
            session.day(),
            session.cursor(),
            session.working_template().len(),
            session.log().len()
        );
    }
    Ok(())
}

fn list_templates(json: bool) -> Result<()> {
    let templates = catalog::all();
    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }
    for template in templates {
        println!("{} - {} ({} sets)", template.day, template.label, template.total_sets());
        for exercise in &template.exercises {
            println!("\t{} x{}", exercise.name, exercise.target_sets);
        }
    }
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    match args.command {
        Commands::Interactive { user } => {
            init_logging(args.log_level, None)?;
            let bot = WorkoutBot::new(MemoryTransport::new());
            let terminal = ratatui::init();
            let result = chat_view::run(terminal, &bot, UserId(user), ChatId(user)).await;
            ratatui::restore();
            result
        }
        Commands::Replay { day, presses, json } => {
            init_logging(args.log_level, Some("warn"))?;
            replay(&day, &presses, json).await
        }
        Commands::Templates { json } => {
            init_logging(args.log_level, Some("warn"))?;
            list_templates(json)
        }
    }
}
