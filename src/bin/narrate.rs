use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use mythika_backend::domain::narration::{
    spawn_narration, NarrationController, Notice, NotificationSink, RATE_RANGE,
};
use mythika_backend::domain::narrator::NarratorId;
use mythika_backend::domain::story::{StoryService, StoryServiceApi};
use mythika_backend::infrastructure::config::{Config, LogFormat};
use mythika_backend::infrastructure::db::create_pool;
use mythika_backend::infrastructure::repositories::{
    seed_if_empty, InMemoryStoryRepository, PgStoryRepository, StoryRepository,
};
use mythika_backend::infrastructure::speech::EspeakEngine;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const RATE_STEP: f32 = 0.25;

/// Read the story of the day aloud with espeak-ng
#[derive(Parser, Debug)]
#[command(name = "narrate", version)]
struct Args {
    /// gogi, tara or anaya
    #[arg(short, long, default_value = "gogi")]
    narrator: NarratorId,

    /// Day whose story to tell (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Preferred voice name, as listed by `espeak-ng --voices`
    #[arg(short, long)]
    voice: Option<String>,

    /// Initial speaking rate, 0.5 to 2.0
    #[arg(short, long)]
    rate: Option<f32>,

    /// Path to the espeak-ng binary
    #[arg(long, env = "ESPEAK_BINARY")]
    espeak: Option<PathBuf>,
}

/// Prints notices where the listener can see them
struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}: {}", notice.title(), notice.description());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;
    init_logging(&config);

    let story_repo: Arc<dyn StoryRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url)
                .await
                .context("failed to connect to the story database")?;
            Arc::new(PgStoryRepository::new(Arc::new(pool)))
        }
        None => {
            let repo = InMemoryStoryRepository::new();
            seed_if_empty(&repo).await?;
            Arc::new(repo)
        }
    };
    let story_service = StoryService::new(story_repo, false);

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let story = story_service.narrated_story(args.narrator, date).await?;

    let mut profile = story.narrator.clone();
    if args.voice.is_some() {
        profile.voice.preferred_voice_name = args.voice.clone();
    }

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let binary = args
        .espeak
        .clone()
        .unwrap_or_else(|| config.narration.espeak_binary.clone());
    let engine = EspeakEngine::probe(binary, events_tx).await;

    let controller = NarrationController::new(
        engine,
        ConsoleNotifier,
        &profile,
        story.text,
        config.narration.controller_options(),
    );
    if !controller.is_supported() {
        anyhow::bail!("no speech synthesis available, install espeak-ng to listen");
    }

    let (handle, task) = spawn_narration(controller, events_rx);

    eprintln!("{} tells \"{}\"", profile.name, story.story_title);
    eprintln!("Commands: p play/resume, a pause, s stop, + faster, - slower, q quit");

    let mut state = handle.subscribe();
    tokio::spawn(async move {
        let mut last = state.borrow().status;
        while state.changed().await.is_ok() {
            let current = state.borrow().clone();
            if current.status != last {
                tracing::info!(
                    status = ?current.status,
                    chunk = current.current_index,
                    chunks = current.chunk_count,
                    "Playback changed"
                );
                last = current.status;
            }
        }
    });

    if let Some(rate) = args.rate {
        handle.set_rate(rate);
    }
    handle.play();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "p" => handle.play(),
            "a" => handle.pause(),
            "s" => handle.stop(),
            "+" => handle.set_rate((handle.state().rate + RATE_STEP).min(*RATE_RANGE.end())),
            "-" => handle.set_rate((handle.state().rate - RATE_STEP).max(*RATE_RANGE.start())),
            "q" => break,
            "" => {}
            other => eprintln!("Unknown command: {other}"),
        }
    }

    handle.shutdown();
    task.await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mythika_backend=info,narrate=info".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
