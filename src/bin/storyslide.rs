use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "storyslide", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every slide of a render request into image files.
    Render(RenderArgs),
    /// Translate the first slide of a story into platform stickers.
    Translate(TranslateArgs),
    /// Print the health payload.
    Health,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Png,
    Jpeg,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Render request JSON (`{"metadata":{"storyData":{...}}}`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `slide_<n>.<ext>` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Render config JSON; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Prefix of the image URLs in the response. Defaults to the output directory.
    #[arg(long)]
    url_prefix: Option<String>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Story JSON carrying a `storyData` object.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render config JSON, used for payload defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(serde::Deserialize)]
struct TranslateInput {
    #[serde(rename = "storyData", default)]
    story_data: storyslide::StoryDataDef,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Translate(args) => cmd_translate(args),
        Command::Health => {
            println!(
                "{}",
                serde_json::to_string(&storyslide::HealthResponse::ok())?
            );
            Ok(())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<storyslide::RenderConfig> {
    match path {
        Some(p) => storyslide::RenderConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(storyslide::RenderConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    let format = match args.format {
        Format::Png => storyslide::OutputFormat::Png,
        Format::Jpeg => storyslide::OutputFormat::Jpeg {
            quality: config.effective_jpeg_quality(),
        },
    };
    let body = std::fs::read(&args.in_path)
        .with_context(|| format!("read request '{}'", args.in_path.display()))?;

    let compositor = storyslide::Compositor::from_config(config)?;
    let prefix = args
        .url_prefix
        .unwrap_or_else(|| args.out_dir.display().to_string());
    let mut sink = storyslide::DirSink::new(&args.out_dir, prefix)?;

    let response = storyslide::handle_render_request(&body, &compositor, &mut sink, format);
    println!("{}", serde_json::to_string_pretty(&response)?);
    if response.status() != 200 {
        anyhow::bail!("render failed with status {}", response.status());
    }
    Ok(())
}

fn cmd_translate(args: TranslateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let f = std::fs::File::open(&args.in_path)
        .with_context(|| format!("open story '{}'", args.in_path.display()))?;
    let input: TranslateInput = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse story '{}'", args.in_path.display()))?;

    let scene = storyslide::Scene::from_def(&input.story_data, &config.scene)?;
    let translator = storyslide::Translator::default();
    let story = translator.translate_slides(scene.slides())?;
    println!("{}", serde_json::to_string_pretty(&story)?);
    Ok(())
}
