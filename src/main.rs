mod scene;

use std::io::{stdout, BufWriter, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use arena_boss::canvas::Canvas;
use arena_boss::compute::{init_world, step, TICK_RATE};
use arena_boss::entities::{InputSnapshot, Point};
use scene::View;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Backing-store samples per terminal cell.
const SCALE: f64 = 2.0;

/// A terminal cell is roughly twice as tall as it is wide; the logical box
/// is fitted against the visual aspect, not the cell count.
const CELL_ASPECT: f64 = 0.5;

/// The fixed-aspect logical drawing box.
const LOGICAL_WIDTH: f64 = 1600.0;
const LOGICAL_HEIGHT: f64 = 750.0;

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    ticks: &AtomicU64,
) -> std::io::Result<()> {
    let mut canvas = Canvas::new();
    let mut world = init_world();
    let mut rng = thread_rng();

    // Latest pointer cell, updated asynchronously and read once per frame.
    let mut pointer_cell = (0u16, 0u16);
    let mut last_frame: Option<Instant> = None;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(());
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        pointer_cell = (column, row);
                    }
                    // Clicks and scrolls are delivered but the sketch has no
                    // use for them.
                    _ => {}
                },
                // Window size is polled each frame instead.
                _ => {}
            }
        }

        // Zero on the first frame, wall time since the last one after that.
        let elapsed_ms = last_frame
            .map(|t| frame_start.duration_since(t).as_secs_f64() * 1e3)
            .unwrap_or(0.0);
        last_frame = Some(frame_start);

        let (cols, rows) = terminal::size()?;
        if cols == 0 || rows == 0 {
            thread::sleep(FRAME);
            continue;
        }

        // Shrink the logical box to the terminal's visual aspect and center
        // it on the origin.
        let ratio = canvas.resize(cols, rows, SCALE) * CELL_ASPECT;
        let mut w = LOGICAL_WIDTH;
        let mut h = LOGICAL_HEIGHT;
        if w < h * ratio {
            h = w / ratio;
        } else {
            w = h * ratio;
        }
        let view = View { x: -w * 0.5, y: -h * 0.5, w, h };
        canvas.set_viewport(view.x, view.y, view.w, view.h);

        // Pointer cells → world units through the same viewport mapping.
        let input = InputSnapshot {
            pointer: Point::new(
                view.x + (f64::from(pointer_cell.0) + 0.5) / f64::from(cols) * view.w,
                view.y + (f64::from(pointer_cell.1) + 0.5) / f64::from(rows) * view.h,
            ),
        };

        world = step(
            &world,
            &input,
            elapsed_ms,
            ticks.load(Ordering::Relaxed),
            &mut rng,
        );

        scene::render(&mut canvas, &world, &view);
        canvas.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    // The logical tick counter runs on its own fixed-interval timer, not
    // phase-locked to the frame loop; the simulation samples it once per
    // frame for its periodic checks.
    let ticks = Arc::new(AtomicU64::new(0));
    {
        let ticks = Arc::clone(&ticks);
        thread::spawn(move || loop {
            thread::sleep(Duration::from_micros(1_000_000 / TICK_RATE));
            ticks.fetch_add(1, Ordering::Relaxed);
        });
    }

    let result = run(&mut out, &rx, &ticks);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
