use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "depboard", version)]
struct Cli {
    /// Log to stderr (filter with RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the board once as a PNG.
    Frame(FrameArgs),
    /// Keep refreshing the board on its schedule, rewriting the PNG after each update.
    Watch(WatchArgs),
    /// Print the ordered departures of every station.
    Departures(DeparturesArgs),
}

#[derive(Parser, Debug)]
struct BoardArgs {
    /// Board configuration JSON. Font, icon and poster paths are relative to it.
    #[arg(long)]
    config: PathBuf,

    /// Directory of departure feeds (`<station-id>[_<direction>].json`).
    #[arg(long)]
    feeds: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    board: BoardArgs,

    /// Reference time (RFC 3339). Defaults to the local clock.
    #[arg(long)]
    now: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the configured canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the configured canvas height.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    #[command(flatten)]
    board: BoardArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many seconds.
    #[arg(long, default_value_t = 60)]
    seconds: u64,
}

#[derive(Parser, Debug)]
struct DeparturesArgs {
    #[command(flatten)]
    board: BoardArgs,

    /// Reference time (RFC 3339). Defaults to the local clock.
    #[arg(long)]
    now: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Watch(args) => cmd_watch(args),
        Command::Departures(args) => cmd_departures(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("depboard=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_now(now: Option<&str>) -> anyhow::Result<DateTime<FixedOffset>> {
    match now {
        Some(s) => DateTime::parse_from_rfc3339(s).with_context(|| format!("parse --now '{s}'")),
        None => Ok(chrono::Local::now().fixed_offset()),
    }
}

fn config_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// Everything a running board needs, loaded once.
struct Loaded {
    config: depboard::BoardConfig,
    text: depboard::TextEngine,
    resources: depboard::Resources,
}

fn load(args: &BoardArgs) -> anyhow::Result<Loaded> {
    let config = depboard::BoardConfig::from_json_path(&args.config)?;
    let base = config_dir(&args.config);

    let mut text = depboard::TextEngine::new();
    depboard::register_fonts(&config.fonts, base, &mut text)?;

    let mut resources = depboard::Resources::new(config.palette, config.dims);
    if let Some(dir) = &config.icon_dir {
        let n = resources.load_icon_dir(&base.join(dir))?;
        tracing::debug!(icons = n, "icons loaded");
    }
    for poster in &config.posters {
        resources
            .load_poster(&base.join(poster))
            .with_context(|| format!("load poster '{}'", poster.display()))?;
    }

    Ok(Loaded {
        config,
        text,
        resources,
    })
}

/// Text metrics for layout: the registered fonts when every role has one,
/// fixed metrics otherwise.
enum Metrics {
    Fonts,
    Fixed(depboard::FixedMeasure),
}

impl Metrics {
    fn for_engine(text: &depboard::TextEngine) -> Self {
        if depboard::FontRole::ALL.iter().all(|r| text.has_role(*r)) {
            Self::Fonts
        } else {
            tracing::warn!("not every font role has a font; measuring with fixed metrics");
            Self::Fixed(depboard::FixedMeasure::new(9.0, 16.0))
        }
    }

    fn measure<'a>(&'a mut self, text: &'a mut depboard::TextEngine) -> &'a mut dyn depboard::Measure {
        match self {
            Self::Fonts => text,
            Self::Fixed(fixed) => fixed,
        }
    }
}

fn write_png(path: &Path, frame: &depboard::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut loaded = load(&args.board)?;
    if let Some(w) = args.width {
        loaded.config.canvas.width = w;
    }
    if let Some(h) = args.height {
        loaded.config.canvas.height = h;
    }
    loaded.config.validate()?;
    let now = parse_now(args.now.as_deref())?;

    let mut metrics = Metrics::for_engine(&loaded.text);
    let mut scene = depboard::Scene::new();
    let mut board = depboard::Board::build(
        &loaded.config,
        loaded.resources,
        &mut scene,
        metrics.measure(&mut loaded.text),
    )?;
    let mut source = depboard::FeedDirSource::new(&args.board.feeds);
    board.run_tasks(
        &[depboard::Task::Stations, depboard::Task::Clock],
        &mut scene,
        metrics.measure(&mut loaded.text),
        &mut source,
        now,
    );

    let frame = depboard::rasterize_scene(
        &scene,
        board.resources().images(),
        &mut loaded.text,
        loaded.config.canvas,
        loaded.config.palette.background_stations,
    )?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let mut loaded = load(&args.board)?;
    let mut metrics = Metrics::for_engine(&loaded.text);
    let mut scene = depboard::Scene::new();
    let mut board = depboard::Board::build(
        &loaded.config,
        loaded.resources,
        &mut scene,
        metrics.measure(&mut loaded.text),
    )?;
    let mut source = depboard::FeedDirSource::new(&args.board.feeds);
    let mut schedule = depboard::Schedule::new(&loaded.config.periods);

    let start = Instant::now();
    let stop = start + Duration::from_secs(args.seconds);
    loop {
        let tasks = schedule.due(Instant::now());
        if !tasks.is_empty() {
            board.run_tasks(
                &tasks,
                &mut scene,
                metrics.measure(&mut loaded.text),
                &mut source,
                parse_now(None)?,
            );
            let frame = depboard::rasterize_scene(
                &scene,
                board.resources().images(),
                &mut loaded.text,
                loaded.config.canvas,
                loaded.config.palette.background_stations,
            )?;
            write_png(&args.out, &frame)?;
            tracing::info!(?tasks, "frame updated");
        }

        let Some(next) = schedule.next_due() else {
            break;
        };
        if next >= stop {
            break;
        }
        std::thread::sleep(next.saturating_duration_since(Instant::now()));
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_departures(args: DeparturesArgs) -> anyhow::Result<()> {
    let config = depboard::BoardConfig::from_json_path(&args.board.config)?;
    let now = parse_now(args.now.as_deref())?;
    let mut source = depboard::FeedDirSource::new(&args.board.feeds);

    for station in &config.stations {
        println!("{} ({})", station.name, station.id);
        match depboard::station_departures(station, &mut source, now, &config.direction_filter) {
            None => println!("  {}", depboard::NO_DATA_TEXT),
            Some(list) => {
                for d in list.iter().take(station.slots()) {
                    let mark = if d.reachable { ' ' } else { '!' };
                    println!(
                        "  {:>3}{mark} {:<6} {}",
                        d.minutes_text(),
                        d.line,
                        d.direction
                    );
                }
            }
        }
    }
    Ok(())
}
