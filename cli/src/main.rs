mod replay;
mod terminal;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use futures_util::{SinkExt, StreamExt};
use messages::{CodecError, Outbound, encode_outbound};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use view::config::{ConfigError, ViewConfig};
use view::router::Effect;
use view::session::SurveyView;

use crate::terminal::{TerminalNavigator, TerminalSurface};

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("timed out connecting to {0}")]
    Timeout(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
}

fn ws_error(error: tokio_tungstenite::tungstenite::Error) -> CliError {
    CliError::Ws(Box::new(error))
}

#[derive(Parser, Debug)]
#[command(name = "survey-cli", about = "Terminal companion for the survey view protocol")]
struct Cli {
    /// Session server URL; overrides `endpoint` from the config file.
    #[arg(long, env = "SURVEY_WS_URL")]
    url: Option<String>,

    /// JSON view config (same format as the page's `startViewWithConfig`).
    #[arg(long, env = "SURVEY_VIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect as a headless view and print every render effect.
    Watch {
        /// Disconnect after this many frames.
        #[arg(long)]
        max_frames: Option<usize>,
    },
    /// Connect, handshake, send one event and disconnect.
    Send(SendCommand),
    /// Route recorded frames (one JSON object per line) without a server.
    Replay {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
}

#[derive(Args, Debug)]
struct SendCommand {
    #[command(subcommand)]
    event: SendEvent,
}

#[derive(Subcommand, Debug)]
enum SendEvent {
    Begin,
    Consent,
    Likert {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    Slide {
        index: u32,
    },
}

impl SendEvent {
    fn into_message(self) -> Outbound {
        match self {
            Self::Begin => Outbound::Begin,
            Self::Consent => Outbound::Consent,
            Self::Likert { name, value } => Outbound::Likert { name, value },
            Self::Slide { index } => Outbound::SlideChange { value: index },
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref(), cli.url)?;
    match cli.command {
        Command::Watch { max_frames } => run_watch(&config, max_frames).await,
        Command::Send(send) => run_send(&config, send.event.into_message()).await,
        Command::Replay { input } => run_replay(&config, &input),
    }
}

fn load_config(path: Option<&std::path::Path>, url: Option<String>) -> Result<ViewConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|source| CliError::Read { path: path.display().to_string(), source })?;
            ViewConfig::from_json(&raw)?
        }
        None => ViewConfig::default(),
    };
    if let Some(url) = url {
        config.endpoint = url;
    }
    config.validate()?;
    Ok(config)
}

/// Open the socket and send the `connected` handshake.
async fn open(endpoint: &str) -> Result<Socket, CliError> {
    let (mut stream, _) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(endpoint))
        .await
        .map_err(|_| CliError::Timeout(endpoint.to_owned()))?
        .map_err(ws_error)?;
    stream
        .send(Message::Text(encode_outbound(&Outbound::Connected)?.into()))
        .await
        .map_err(ws_error)?;
    tracing::info!(endpoint, "connected");
    Ok(stream)
}

fn terminal_view(config: &ViewConfig) -> SurveyView<TerminalSurface<io::Stdout>, TerminalNavigator<io::Stdout>> {
    SurveyView::new(config, TerminalSurface::new(io::stdout()), TerminalNavigator::new(io::stdout()))
}

async fn run_watch(config: &ViewConfig, max_frames: Option<usize>) -> Result<(), CliError> {
    let mut stream = open(&config.endpoint).await?;
    let mut view = terminal_view(config);
    let mut frames = 0_usize;

    while let Some(message) = stream.next().await {
        match message.map_err(ws_error)? {
            Message::Text(text) => {
                frames += 1;
                match view.handle_text(text.as_str()) {
                    Ok(Effect::Dropped { slide }) => tracing::info!(slide, "materialIndex for unmapped slide"),
                    Ok(Effect::Ignored) => tracing::info!(frame = text.as_str(), "ignored frame"),
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "dropped frame"),
                }
                if max_frames.is_some_and(|max| frames >= max) {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::info!(frames, "disconnected");
    Ok(())
}

async fn run_send(config: &ViewConfig, message: Outbound) -> Result<(), CliError> {
    let mut stream = open(&config.endpoint).await?;
    let text = encode_outbound(&message)?;
    stream.send(Message::Text(text.clone().into())).await.map_err(ws_error)?;
    println!("{text}");
    stream.close(None).await.map_err(ws_error)
}

fn run_replay(config: &ViewConfig, input: &str) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file =
            File::open(input).map_err(|source| CliError::Read { path: input.to_owned(), source })?;
        Box::new(BufReader::new(file))
    };

    let mut view = terminal_view(config);
    let summary = replay::replay(reader, &mut view)
        .map_err(|source| CliError::Read { path: input.to_owned(), source })?;
    eprintln!(
        "{} frames: {} rendered, {} dropped, {} ignored, {} failed",
        summary.frames, summary.rendered, summary.dropped, summary.ignored, summary.failed
    );
    Ok(())
}
