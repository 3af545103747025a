use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frame_spectra::config::{
    AnalysisConfig, Session, DEFAULT_FRAME_LENGTH, DEFAULT_LPC_ORDER, DEFAULT_SESSION_FILE,
};
use frame_spectra::source::{resolve_path, EnvPath, LiteralPath, PathProvider, SessionPath};
use frame_spectra::{
    analyze_file, CurveRenderer, FrequencyAxis, LpcMethod, TerminalRenderer, WindowType,
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Inspect one frame of audio: zero-padded FFT spectrum and LPC spectral envelope"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze the centered frame of a WAV file
    Analyze(AnalyzeArgs),

    /// Record an audio path (and optional parameters) in the session file
    Select(SelectArgs),

    /// Print the current session file
    ShowSession {
        #[arg(long, default_value = DEFAULT_SESSION_FILE)]
        session: PathBuf,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Audio file. Falls back to $FRAME_SPECTRA_AUDIO, then the session file
    path: Option<PathBuf>,

    /// Frame length in samples [default: 2048]
    #[arg(short = 'n', long, value_parser = parse_positive)]
    frame_length: Option<usize>,

    /// LPC model order [default: 16]
    #[arg(short = 'p', long, value_parser = parse_positive)]
    lpc_order: Option<usize>,

    /// Frame taper: hann, hamming, blackman or rectangular
    #[arg(long, default_value_t = WindowType::Hann)]
    window: WindowType,

    /// LPC estimator: autocorrelation or burg
    #[arg(long, default_value_t = LpcMethod::Autocorrelation)]
    lpc_method: LpcMethod,

    /// Frequency axis: linspace (0..=sr/2) or bins (k*sr/n_fft)
    #[arg(long, default_value_t = FrequencyAxis::Linspace)]
    axis: FrequencyAxis,

    #[arg(long, default_value = DEFAULT_SESSION_FILE)]
    session: PathBuf,

    /// Plot columns per panel
    #[arg(long, default_value_t = 96)]
    width: usize,

    /// Plot rows per panel
    #[arg(long, default_value_t = 16)]
    height: usize,
}

#[derive(Args)]
struct SelectArgs {
    /// Audio file to remember
    path: PathBuf,

    #[arg(short = 'n', long, value_parser = parse_positive)]
    frame_length: Option<usize>,

    #[arg(short = 'p', long, value_parser = parse_positive)]
    lpc_order: Option<usize>,

    #[arg(long, default_value = DEFAULT_SESSION_FILE)]
    session: PathBuf,
}

fn parse_positive(s: &str) -> std::result::Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a positive integer"))?;
    if value == 0 {
        return Err("must be a positive integer".to_string());
    }
    Ok(value)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frame_spectra=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => analyze(args),
        Command::Select(args) => select(args),
        Command::ShowSession { session } => show_session(session),
    }
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let mut providers: Vec<Box<dyn PathProvider>> = Vec::new();
    if let Some(path) = &args.path {
        providers.push(Box::new(LiteralPath(path.clone())));
    }
    providers.push(Box::new(EnvPath::default()));
    providers.push(Box::new(SessionPath::new(&args.session)));

    let path = resolve_path(&providers)?;

    let mut config = AnalysisConfig {
        frame_length: args.frame_length.unwrap_or(DEFAULT_FRAME_LENGTH),
        lpc_order: args.lpc_order.unwrap_or(DEFAULT_LPC_ORDER),
        window: args.window,
        lpc_method: args.lpc_method,
        axis: args.axis,
    };

    if let Some(session) = Session::load(&args.session)? {
        config = config.with_session_overrides(
            &session,
            &path,
            args.frame_length.is_some(),
            args.lpc_order.is_some(),
        );
    }

    let analysis = analyze_file(&path, &config)
        .with_context(|| format!("analysis of {} failed", path.display()))?;

    let stdout = io::stdout();
    let mut renderer = TerminalRenderer::new(stdout.lock(), args.width, args.height);
    renderer
        .render(&analysis.spectrum, &analysis.envelope, analysis.sample_rate)
        .context("failed to render curves")?;

    Ok(())
}

fn select(args: SelectArgs) -> Result<()> {
    std::fs::metadata(&args.path)
        .with_context(|| format!("cannot select {}", args.path.display()))?;

    let session = Session {
        audio_path: args.path,
        frame_length: args.frame_length,
        lpc_order: args.lpc_order,
    };
    session
        .save(&args.session)
        .with_context(|| format!("failed to write {}", args.session.display()))?;

    tracing::info!(
        audio = %session.audio_path.display(),
        session = %args.session.display(),
        "selection saved"
    );
    println!("{}", session.audio_path.display());

    Ok(())
}

fn show_session(path: PathBuf) -> Result<()> {
    let Some(session) = Session::load(&path)? else {
        bail!("no session file at {}", path.display());
    };

    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
