//! trace_column - print the portal chain behind one screen column.
//!
//! USAGE:
//! ```bash
//! cargo run --bin trace_column -- --column 200
//! cargo run --bin trace_column -- --map maps/demo.pmap --turn 45 --max-hops 2
//! ```

use clap::Parser;
use std::path::PathBuf;

use portal_caster::{
    engine::{ChainBuilder, MAX_PORTAL_HOPS, RayChain, Screen},
    map,
    renderer::software::PaintContext,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file (`.pmap`); the built-in demo room when omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// View width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// View height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Column to trace; the centre column when omitted
    #[arg(long)]
    column: Option<usize>,

    /// Turn the spawn camera by this many degrees first (counter-clockwise)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    turn: f64,

    /// Portal hops followed per column
    #[arg(long, default_value_t = MAX_PORTAL_HOPS)]
    max_hops: usize,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    anyhow::ensure!(opts.height > 0, "view height must be at least 1 pixel");
    let column = opts.column.unwrap_or(opts.width / 2);
    anyhow::ensure!(
        column < opts.width,
        "column {column} is outside a {}-pixel view",
        opts.width
    );

    let level = map::load_or_demo(opts.map.as_ref())?;
    let mut camera = level.spawn;
    camera.rotate(opts.turn.to_radians());

    let screen = Screen::new(opts.width, opts.height);
    let mut chain = RayChain::new();
    ChainBuilder::with_max_hops(opts.max_hops).build_column(
        &level,
        &camera,
        column,
        opts.width,
        &mut chain,
    );

    let dir = camera.ray_dir(column, opts.width);
    println!("Level: {}", level.name);
    println!(
        "camera ({:.3}, {:.3})  ray ({:.4}, {:.4})  column {column}/{}",
        camera.pos.x, camera.pos.y, dir.x, dir.y, opts.width
    );
    println!(
        "{:>3}  {:>9}  {:>4}  {:>16}  {:>8}  {:>4} {:<5}  {:>6}  {:>11}",
        "#", "cell", "code", "origin", "dist", "side", "face", "wall_x", "rows"
    );

    for (i, ray) in chain.iter().enumerate() {
        let ctx = PaintContext::project(ray, screen);
        let cell = format!("({},{})", ray.cell.x, ray.cell.y);
        let origin = format!("({:.3},{:.3})", ray.origin.x, ray.origin.y);
        let rows = format!("{}..={}", ctx.draw_start, ctx.draw_end);
        let portal = match level.portals.exit(ray.cell) {
            Some(exit) if i + 1 < chain.len() => format!("  -> ({},{})", exit.x, exit.y),
            Some(_) => "  (hop limit)".to_string(),
            None => String::new(),
        };
        println!(
            "{i:>3}  {cell:>9}  {:>4}  {origin:>16}  {:>8.4}  {:>4} {:<5}  {:>6.4}  {rows:>11}{portal}",
            ray.code,
            ray.distance,
            format!("{:?}", ray.side),
            format!("{:?}", ray.face),
            ray.wall_x,
        );
    }
    Ok(())
}
