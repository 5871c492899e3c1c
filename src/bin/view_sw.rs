//! view_sw - interactive window around the software column renderer.
//!
//! ```bash
//! cargo run --release --bin view_sw -- --map maps/demo.pmap --max-hops 8
//! ```
//!
//! ↑/↓ or W/S walk, ←/→ turn, A/D (or Alt + ←/→) strafe, Shift runs,
//! Esc quits.

use clap::Parser;
use minifb::{Key, Window, WindowOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use portal_caster::{
    engine::{ChainBuilder, MAX_PORTAL_HOPS},
    map,
    renderer::{RendererExt, Software},
    sim::{InputCmd, apply_input},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file (`.pmap`); the built-in demo room when omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Portal hops followed per column
    #[arg(long, default_value_t = MAX_PORTAL_HOPS)]
    max_hops: usize,

    /// Target frame rate
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let level = map::load_or_demo(opts.map.as_ref())?;
    println!(
        "Level: {}  ({}x{}, {} portal pair(s))",
        level.name,
        level.grid.width(),
        level.grid.height(),
        level.portals.pair_count(),
    );

    let mut camera = level.spawn;
    let mut renderer = Software::with_builder(ChainBuilder::with_max_hops(opts.max_hops));

    let mut win = Window::new(
        "Portal Caster Software Render",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last_frame.elapsed().as_secs_f64();
        last_frame = Instant::now();

        /* --------------- one InputCmd per frame ---------------------------- */
        let mut cmd = InputCmd::default();

        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            cmd.forward -= 1.0;
        }

        let alt = win.is_key_down(Key::LeftAlt) || win.is_key_down(Key::RightAlt);
        if alt {
            /* Alt + ←/→  = strafe */
            if win.is_key_down(Key::Left) {
                cmd.strafe -= 1.0;
            }
            if win.is_key_down(Key::Right) {
                cmd.strafe += 1.0;
            }
        } else {
            /* plain ←/→   = turn   */
            if win.is_key_down(Key::Left) {
                cmd.turn += 1.0;
            }
            if win.is_key_down(Key::Right) {
                cmd.turn -= 1.0;
            }
        }

        if win.is_key_down(Key::A) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            cmd.strafe += 1.0;
        }
        cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);

        apply_input(&mut camera, &level.grid, cmd, dt);

        /* draw */
        let t0 = Instant::now();
        let mut shown = Ok(());
        renderer.draw_frame(opts.width, opts.height, &level, &camera, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
