use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use snapgrid::render::{self, CellScale};
use snapgrid::window::decorator::TitleBarDecorator;
use snapgrid::{Effect, Point, ResizePolicy, Size, WindowId, WmConfig, WmEvent, Workspace};

#[derive(Parser, Debug)]
#[command(
    name = "snap-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replays pseudo-random drags through the window manager reducer"
)]
struct BenchCli {
    /// Number of core events to apply.
    #[arg(short = 'e', long = "events", value_name = "COUNT", default_value_t = 200_000)]
    events: u64,

    /// Number of windows kept alive during the run.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 8)]
    windows: usize,

    /// Seed for the event generator. Equal seeds replay equal scripts.
    #[arg(short = 's', long = "seed", default_value_t = 0x5EED)]
    seed: u64,

    /// Render a snapshot into an off-screen buffer every N events (0 disables).
    #[arg(short = 'r', long = "render-every", value_name = "N", default_value_t = 0)]
    render_every: u64,
}

struct BenchConfig {
    events: u64,
    windows: usize,
    seed: u64,
    render_every: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if cli.events == 0 {
            return Err("events must be positive".to_string());
        }
        if !(1..=64).contains(&cli.windows) {
            return Err("windows must be between 1 and 64".to_string());
        }
        Ok(Self {
            events: cli.events,
            windows: cli.windows,
            seed: cli.seed,
            render_every: cli.render_every,
        })
    }
}

const COLS: u16 = 120;
const ROWS: u16 = 40;

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_benchmark(&config)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn run_benchmark(config: &BenchConfig) -> io::Result<BenchStats> {
    let scale = CellScale::default();
    // Root-only resizes fail the covering check in `validate`.
    let wm_config = WmConfig::default().with_resize_policy(ResizePolicy::Proportional);
    let mut workspace = Workspace::new(scale.viewport(COLS, ROWS), wm_config);
    let mut script = Script::new(config.seed, config.windows);
    let mut terminal = Terminal::new(TestBackend::new(COLS, ROWS))
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut stats = BenchStats::new();

    while stats.events < config.events {
        let event = script.next_event(&workspace);
        let started = Instant::now();
        let effect = workspace.apply(&event);
        stats.record_event(effect, started.elapsed());

        if config.render_every > 0 && stats.events % config.render_every == 0 {
            let snapshot = workspace.snapshot();
            let started = Instant::now();
            terminal
                .draw(|frame| {
                    render::draw(frame, &snapshot, scale, &TitleBarDecorator, None, None);
                })
                .map_err(|err| io::Error::other(err.to_string()))?;
            stats.record_frame(started.elapsed());
        }
    }

    stats.tree_valid = workspace.tree().validate().is_ok();
    stats.leaves = workspace.tree().leaves().len();
    stats.mark_completed();
    Ok(stats)
}

/// Generates a plausible stream of user input: windows are created up to a
/// target, then dragged around with the occasional close, move-out or
/// resize.
struct Script {
    rng: Lcg,
    target_windows: usize,
    pending: Vec<WmEvent>,
}

impl Script {
    fn new(seed: u64, target_windows: usize) -> Self {
        Self {
            rng: Lcg::new(seed),
            target_windows,
            pending: Vec::new(),
        }
    }

    fn next_event(&mut self, workspace: &Workspace) -> WmEvent {
        if let Some(event) = self.pending.pop() {
            return event;
        }
        let viewport = workspace.viewport();
        let ids: Vec<WindowId> = workspace.windows().iter().map(|w| w.id()).collect();
        if ids.len() < self.target_windows {
            return WmEvent::CreateWindow;
        }
        let victim = ids[self.rng.below(ids.len() as u64) as usize];
        match self.rng.below(100) {
            0..=2 => WmEvent::CloseWindow(victim),
            3..=5 => WmEvent::MoveWindowOut(victim),
            6 => {
                let width = 800.0 + self.rng.below(800) as f64;
                let height = 600.0 + self.rng.below(400) as f64;
                WmEvent::ViewportResize { width, height }
            }
            _ => self.queue_drag(workspace, victim, viewport),
        }
    }

    /// Queues moves and a release in reverse so `pop` yields them in order.
    fn queue_drag(&mut self, workspace: &Workspace, window: WindowId, viewport: Size) -> WmEvent {
        let grab = workspace
            .windows()
            .get(window)
            .map(|w| {
                let r = w.rect();
                Point::new(r.x + r.width.min(20.0) / 2.0, r.y + r.height.min(20.0) / 2.0)
            })
            .unwrap_or(Point::new(0.0, 0.0));
        let target = self.target_point(viewport);
        let steps = 1 + self.rng.below(6);
        self.pending.push(WmEvent::PointerUp(target));
        for step in (1..=steps).rev() {
            let t = step as f64 / steps as f64;
            self.pending.push(WmEvent::PointerMove(Point::new(
                grab.x + (target.x - grab.x) * t,
                grab.y + (target.y - grab.y) * t,
            )));
        }
        WmEvent::PointerDown {
            window,
            position: grab,
        }
    }

    /// Biased towards edges so snapping and splitting actually happen.
    fn target_point(&mut self, viewport: Size) -> Point {
        let x = self.rng.unit() * viewport.width;
        let y = self.rng.unit() * viewport.height;
        match self.rng.below(5) {
            0 => Point::new(self.rng.unit() * 20.0, y),
            1 => Point::new(viewport.width - self.rng.unit() * 20.0, y),
            2 => Point::new(x, self.rng.unit() * 20.0),
            3 => Point::new(x, viewport.height - self.rng.unit() * 20.0),
            _ => Point::new(x, y),
        }
    }
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0xA5A5_A5A5_1234_5678,
        }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn below(&mut self, bound: u64) -> u64 {
        u64::from(self.next()) % bound.max(1)
    }

    fn unit(&mut self) -> f64 {
        f64::from(self.next()) / f64::from(u32::MAX)
    }
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    events: u64,
    noops: u64,
    docks: u64,
    screen_snaps: u64,
    total_apply_time: Duration,
    slowest_apply: Duration,
    frames: u64,
    total_frame_time: Duration,
    leaves: usize,
    tree_valid: bool,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            events: 0,
            noops: 0,
            docks: 0,
            screen_snaps: 0,
            total_apply_time: Duration::ZERO,
            slowest_apply: Duration::ZERO,
            frames: 0,
            total_frame_time: Duration::ZERO,
            leaves: 0,
            tree_valid: false,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_event(&mut self, effect: Effect, apply_time: Duration) {
        self.events = self.events.saturating_add(1);
        self.total_apply_time += apply_time;
        self.slowest_apply = self.slowest_apply.max(apply_time);
        match effect {
            Effect::Unchanged => self.noops += 1,
            Effect::Dropped(snapgrid::drag::DragOutcome::Docked { .. }) => self.docks += 1,
            Effect::Dropped(snapgrid::drag::DragOutcome::SnappedToScreen { .. }) => {
                self.screen_snaps += 1
            }
            _ => {}
        }
    }

    fn record_frame(&mut self, draw_time: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.total_frame_time += draw_time;
    }

    fn average_apply_us(&self) -> f64 {
        if self.events == 0 {
            return 0.0;
        }
        self.total_apply_time.as_secs_f64() / self.events as f64 * 1_000_000.0
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total_frame_time.as_secs_f64() / self.frames as f64 * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let events_per_second = if elapsed > 0.0 {
            self.events as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Snap bench finished (seed {seed:#x}, {windows} windows).
            Events: {events} in {elapsed:.2}s (~{eps:.0}/s)
            Apply: avg {avg:.2} us | worst {worst:.2} us | no-ops {noops}
            Commits: {docks} region docks | {snaps} screen-edge snaps
            Frames: {frames} | avg {frame_ms:.2} ms
            Final tree: {leaves} leaves, {validity}
            "#,
            seed = config.seed,
            windows = config.windows,
            events = self.events,
            elapsed = elapsed,
            eps = events_per_second,
            avg = self.average_apply_us(),
            worst = self.slowest_apply.as_secs_f64() * 1_000_000.0,
            noops = self.noops,
            docks = self.docks,
            snaps = self.screen_snaps,
            frames = self.frames,
            frame_ms = self.average_frame_ms(),
            leaves = self.leaves,
            validity = if self.tree_valid { "valid" } else { "INVALID" },
        )
    }
}
