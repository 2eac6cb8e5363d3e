#![forbid(unsafe_code)]

//! Terminal playback for the black-hole transition.
//!
//! Renders a colored backdrop, waits for a keypress, then plays the full
//! transition over it using half-block cells (two pixel rows per terminal
//! cell). Exits once the completion callback has fired.
//!
//! `--headless <frames>` runs a fixed-step simulation without a TTY and
//! prints a summary, for CI.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{Event, KeyCode, KeyEventKind, poll, read};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
};
use crossterm::{execute, queue};

use bhfx_core::transition::{BlackHoleTransition, TransitionEvent};
use bhfx_render::{OverlayFx, PackedRgba, RenderContext};

const FRAME: Duration = Duration::from_millis(33);

fn main() -> io::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("--headless") => {
            let frames: u32 = args
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(240);
            headless(frames);
            Ok(())
        }
        _ => interactive(),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

// ---------------------------------------------------------------------------
// Terminal session guard
// ---------------------------------------------------------------------------

/// Restores the terminal on drop, whatever path the demo exits through.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// Interactive playback
// ---------------------------------------------------------------------------

fn interactive() -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    let mut transition = BlackHoleTransition::new();
    let fx = OverlayFx::new();

    let mut completed = false;
    let mut last_frame = Instant::now();
    let mut pixels: Vec<PackedRgba> = Vec::new();

    loop {
        // Input: q/Esc quits, anything else (re)triggers.
        while poll(Duration::ZERO)? {
            if let Event::Key(key) = read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {
                        // A fresh rising edge restarts the full sequence.
                        transition.set_triggered(false);
                        transition.set_triggered(true);
                    }
                }
            }
        }

        let dt = last_frame.elapsed().min(Duration::from_millis(100));
        last_frame = Instant::now();
        transition.update(dt);

        for event in transition.drain_events() {
            tracing::debug!(?event, "transition milestone");
            if event == TransitionEvent::Completed {
                completed = true;
            }
        }

        let (cols, rows) = size()?;
        let ctx = RenderContext::new(cols, rows.saturating_mul(2));
        pixels.resize(ctx.len(), PackedRgba::TRANSPARENT);

        paint_backdrop(ctx, &mut pixels);
        if let Some(scene) = transition.scene() {
            fx.render(&scene, ctx, &mut pixels);
        }
        present(&mut stdout, ctx, &pixels)?;

        if completed {
            // The host would swap the page here; the demo just leaves the
            // swallowed screen up for a beat and exits.
            std::thread::sleep(Duration::from_millis(400));
            return Ok(());
        }

        let spent = last_frame.elapsed();
        if spent < FRAME {
            std::thread::sleep(FRAME - spent);
        }
    }
}

/// The content the hole swallows: a plain two-axis color wash.
fn paint_backdrop(ctx: RenderContext, out: &mut [PackedRgba]) {
    if ctx.is_empty() {
        return;
    }
    let w = f32::from(ctx.width.max(1) - 1).max(1.0);
    let h = f32::from(ctx.height.max(1) - 1).max(1.0);
    for y in 0..ctx.height {
        let row = y as usize * ctx.width as usize;
        for x in 0..ctx.width {
            let fx = f32::from(x) / w;
            let fy = f32::from(y) / h;
            let r = (40.0 + 120.0 * fx) as u8;
            let g = (60.0 + 80.0 * (1.0 - fy)) as u8;
            let b = (110.0 + 100.0 * fy) as u8;
            out[row + x as usize] = PackedRgba::rgb(r, g, b);
        }
    }
}

/// Present the pixel buffer as half-block cells: the glyph `▀` shows the
/// upper pixel as foreground and the lower as background.
fn present(stdout: &mut io::Stdout, ctx: RenderContext, pixels: &[PackedRgba]) -> io::Result<()> {
    let cell_rows = ctx.height / 2;
    for row in 0..cell_rows {
        queue!(stdout, MoveTo(0, row))?;
        let top_row = (row as usize * 2) * ctx.width as usize;
        let bottom_row = top_row + ctx.width as usize;
        for x in 0..ctx.width as usize {
            let top = pixels[top_row + x];
            let bottom = pixels[bottom_row + x];
            queue!(
                stdout,
                SetForegroundColor(Color::Rgb {
                    r: top.r(),
                    g: top.g(),
                    b: top.b()
                }),
                SetBackgroundColor(Color::Rgb {
                    r: bottom.r(),
                    g: bottom.g(),
                    b: bottom.b()
                }),
                Print('▀')
            )?;
        }
    }
    queue!(stdout, ResetColor)?;
    stdout.flush()
}

// ---------------------------------------------------------------------------
// Headless playback
// ---------------------------------------------------------------------------

fn headless(frames: u32) {
    let fx = OverlayFx::new();
    let ctx = RenderContext::new(80, 48);
    let mut pixels = vec![PackedRgba::TRANSPARENT; ctx.len()];
    let mut transition = BlackHoleTransition::new();
    let mut milestones = Vec::new();

    for frame in 0..frames {
        if frame == 5 {
            transition.set_triggered(true);
        }
        transition.update(Duration::from_millis(16));
        milestones.extend(transition.drain_events());

        paint_backdrop(ctx, &mut pixels);
        if let Some(scene) = transition.scene() {
            fx.render(&scene, ctx, &mut pixels);
        }
    }

    let swallowed = pixels.iter().all(|p| *p == PackedRgba::BLACK);
    println!("frames: {frames}");
    println!("milestones: {milestones:?}");
    println!("screen swallowed: {swallowed}");
}
