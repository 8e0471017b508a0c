//! Renders a room document to SVG on stdout.
//!
//! Usage:
//! ```text
//! cargo run --example sketch_svg                                   # bundled simple room
//! cargo run --example sketch_svg -- demos/rooms/t_shape.json       # custom room
//! cargo run --example sketch_svg -- demos/rooms/t_shape.json 3     # select the 4th wall
//! ```
//!
//! Logging defaults to WARN, INFO for roomsketch; override with `RUST_LOG`.

use std::process::ExitCode;

use roomsketch::render::SvgSurface;
use roomsketch::{load_room, SketchParams, Sketcher};

const SIMPLE_ROOM: &str = include_str!("rooms/simple.json");

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roomsketch=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(svg) => {
            print!("{svg}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let json = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SIMPLE_ROOM.to_owned(),
    };
    let advance = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(0);

    let params = SketchParams::default();
    let mut sketcher = Sketcher::new(params);
    sketcher.load_room(load_room(&json)?)?;
    for _ in 0..advance {
        sketcher.select_next_wall()?;
    }

    let mut surface = SvgSurface::new(params.canvas.width, params.canvas.height);
    sketcher.render(&mut surface);
    Ok(surface.to_svg())
}
