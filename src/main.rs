//! karaoke-sync - inspect subtitle files and preview synced lyrics in a terminal

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use karaoke_sync::features::lyrics::{
    HighlightStyle, RenderInstruction, SubtitleFormat, SyncState, parse_subtitle_file,
};
use karaoke_sync::features::{KaraokeSession, LyricsSink, PlaybackClock, Settings};

/// Parse subtitle files and play back their lyrics against a simulated clock.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every parsed entry
    Inspect(InspectCommand),
    /// Run the lyrics in real time
    Play(PlayCommand),
}

#[derive(Args, Debug)]
struct InspectCommand {
    file: PathBuf,
    /// Skip detection and force a format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args, Debug)]
struct PlayCommand {
    file: PathBuf,
    /// Skip detection and force a format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
    /// Playback speed multiplier
    #[arg(short, long, default_value_t = 1.0)]
    speed: f64,
    /// Tick interval, overrides the settings file
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Settings file, defaults to the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Srt,
    Vtt,
    Json,
    Compact,
}

impl From<FormatArg> for SubtitleFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Srt => SubtitleFormat::Srt,
            FormatArg::Vtt => SubtitleFormat::Vtt,
            FormatArg::Json => SubtitleFormat::Json,
            FormatArg::Compact => SubtitleFormat::Compact,
        }
    }
}

/// Wall clock scaled by a speed factor
struct SimulatedClock {
    started: Instant,
    speed: f64,
}

impl SimulatedClock {
    fn new(speed: f64) -> Self {
        Self {
            started: Instant::now(),
            speed,
        }
    }
}

impl PlaybackClock for SimulatedClock {
    fn is_playing(&self) -> bool {
        true
    }

    fn position_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * self.speed
    }
}

/// Prints an instruction whenever what it shows changes
struct TerminalSink {
    style: HighlightStyle,
    last: Option<(String, String, String)>,
}

impl LyricsSink for TerminalSink {
    fn render(&mut self, instruction: &RenderInstruction) {
        let frame = (
            instruction.previous.clone(),
            self.style.current_text(instruction),
            instruction.next.clone(),
        );
        if self.last.as_ref() == Some(&frame) {
            return;
        }

        let (previous, current, next) = &frame;
        if instruction.is_idle() {
            println!("~");
        } else {
            println!("{:<30} | {} | {}", previous, current, next);
        }
        self.last = Some(frame);
    }
}

fn inspect(cmd: InspectCommand) -> Result<()> {
    let track = parse_subtitle_file(&cmd.file, cmd.format.map(Into::into))
        .with_context(|| format!("Failed to parse {}", cmd.file.display()))?;

    for (idx, line) in track.iter().enumerate() {
        println!("{:>4}  {} --> {}  {}", idx, line.start, line.end, line.text);
    }
    println!("{} entries", track.len());
    Ok(())
}

async fn play(cmd: PlayCommand) -> Result<()> {
    if !(cmd.speed.is_finite() && cmd.speed > 0.0) {
        bail!("Speed must be a positive number, got {}", cmd.speed);
    }

    let settings = match &cmd.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load(),
    };
    let tick_ms = cmd.tick_ms.unwrap_or(settings.sync.tick_interval_ms).max(1);

    let sink = TerminalSink {
        style: settings.display.highlight_style(),
        last: None,
    };
    let mut session = KaraokeSession::new(SimulatedClock::new(cmd.speed), sink, settings.display);

    let count = session
        .load_subtitle_file(&cmd.file, cmd.format.map(Into::into))
        .with_context(|| format!("No lyrics available for {}", cmd.file.display()))?;
    if count == 0 {
        tracing::warn!("{} contains no cues", cmd.file.display());
        return Ok(());
    }

    tracing::info!("Playing {} lines, tick every {}ms", count, tick_ms);
    session.start();

    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                session.tick();
                if session.engine().state() != SyncState::Active {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                session.stop();
                break;
            }
        }
    }

    tracing::info!("Finished at {:.2}s", session.clock().position_secs());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => inspect(cmd)?,
        Commands::Play(cmd) => play(cmd).await?,
    }

    Ok(())
}
