mod sound;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sound::LoggedSound;
use std::path::PathBuf;
use tessera_core::{Event, Rgb, Viewport};
use tessera_raster::Framebuffer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Lay out, script and render a Tessera markup file", long_about = None)]
struct Cli {
    /// Markup file to load
    input: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Scripted event, applied in order: click:X,Y | hover:X,Y | sound[:NAME]
    #[arg(long = "event", value_parser = parse_event)]
    events: Vec<Event>,

    /// Render the final state to this image (png or ppm)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the final state back out as markup
    #[arg(long)]
    emit: Option<PathBuf>,

    /// Print the final tree as JSON
    #[arg(long)]
    snapshot: bool,

    /// Directory sound names are resolved against
    #[arg(long, default_value = ".")]
    sounds: PathBuf,

    /// Fail if the document needed any repairs
    #[arg(long)]
    strict: bool,
}

fn parse_event(s: &str) -> Result<Event, String> {
    let (kind, rest) = match s.split_once(':') {
        Some((kind, rest)) => (kind, Some(rest)),
        None => (s, None),
    };

    match (kind, rest) {
        ("sound", name) => Ok(Event::sound(name.filter(|n| !n.is_empty()))),
        ("click" | "hover", Some(point)) => {
            let (x, y) = point
                .split_once(',')
                .ok_or_else(|| format!("expected X,Y after '{}:'", kind))?;
            let x: i32 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
            let y: i32 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
            Ok(if kind == "click" {
                Event::click(x, y)
            } else {
                Event::show(x, y)
            })
        }
        ("click" | "hover", None) => {
            Err(format!("'{}' needs a position, e.g. {}:10,20", kind, kind))
        }
        _ => Err(format!("unknown event '{}'", kind)),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let document = tessera_markup::parse_file(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    if !document.is_clean() {
        tracing::warn!(
            "{} repaired problems in {}",
            document.diagnostics.len(),
            cli.input.display()
        );
        if cli.strict {
            for diagnostic in &document.diagnostics {
                eprintln!("{}: {}", cli.input.display(), diagnostic);
            }
            bail!("{} is not clean", cli.input.display());
        }
    }

    let mut tree = document.tree;
    let viewport = Viewport::new(cli.width, cli.height);
    tree.position(viewport);
    tracing::info!(
        "Loaded {} layouts into {}x{}",
        tree.len(),
        viewport.width,
        viewport.height
    );

    let mut sound = LoggedSound::new(&cli.sounds);
    for event in &cli.events {
        let consumed = tree.dispatch(event, &mut sound);
        tracing::info!("{:?} consumed: {}", event, consumed);
    }
    if sound.played > 0 {
        tracing::info!("{} sounds played", sound.played);
    }

    if let Some(out) = &cli.out {
        let mut frame = Framebuffer::new(viewport.width, viewport.height);
        frame.clear(Rgb::BLACK);
        tree.render(&mut frame);
        frame
            .save(out)
            .with_context(|| format!("Failed to render to {}", out.display()))?;
    }

    if let Some(emit) = &cli.emit {
        tessera_markup::write_file(&tree, emit)
            .with_context(|| format!("Failed to write {}", emit.display()))?;
    }

    if cli.snapshot {
        let json = serde_json::to_string_pretty(&tree.snapshot())
            .context("Failed to serialise snapshot")?;
        println!("{}", json);
    }

    Ok(())
}
