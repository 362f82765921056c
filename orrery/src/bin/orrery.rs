use clap::{Args, Parser, Subcommand};
use ephemeris::prelude::{Catalogue, StarSystemKind};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use orrery_lib::{
    driver::{AnimationDriver, FrameConsumer},
    kepler::{Dimensionality, Point},
    palette::{centre_colour, spiro_colours, Palette},
    playback_info::PlaybackInfo,
    sampler::{Frame, OrbitPaths},
    settings::Settings,
    spirograph::{self, PointPair, SpiroConsumer, SpiroDriver, SpiroProgress, SpiroSpeed},
    stats::StatsPanel,
    ticker::Ticker,
    AnimationComponent,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Settings toml file.
    ///
    /// The defaults (Solar System, all planets around the Sun) are used when
    /// not provided.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the orbit animation, printing frames and statistics
    Orbits(OrbitOpts),

    /// Draw chords between two bodies as they orbit
    Spirograph(SpiroOpts),

    /// Print the star system catalogue
    List,
}

#[derive(Args, Debug)]
struct OrbitOpts {
    /// Star system (solar-system, tau-ceti, hd-219134, proxima-centauri)
    #[arg(long)]
    star_system: Option<StarSystemKind>,

    /// Body at the origin of the animation
    #[arg(long)]
    centre: Option<String>,

    /// Comma separated bodies to animate
    #[arg(long, value_delimiter = ',')]
    bodies: Vec<String>,

    /// Wall-clock time per orbit of the slowest body (e.g. 2s, 1500ms)
    #[arg(long)]
    orbit_duration: Option<humantime::Duration>,

    #[arg(long)]
    orbit_count: Option<u32>,

    /// 2d or 3d
    #[arg(long)]
    view: Option<Dimensionality>,

    /// Stop after the last frame instead of wrapping around
    #[arg(long)]
    no_repeat: bool,

    /// Body to print statistics for, defaults to the first animated body
    #[arg(long)]
    stats_body: Option<String>,

    /// Colour shuffle seed, random when neither this nor the settings file sets one
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    frames: Option<u64>,

    /// Print every Nth frame
    #[arg(long, default_value_t = 10)]
    print_every: usize,

    /// Print frames and statistics as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SpiroOpts {
    #[arg(long)]
    star_system: Option<StarSystemKind>,

    #[arg(long)]
    first: Option<String>,

    #[arg(long)]
    second: Option<String>,

    /// Orbits of the slower body
    #[arg(long)]
    orbits: Option<u32>,

    /// slow, medium or fast
    #[arg(long)]
    speed: Option<SpiroSpeed>,

    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many lines
    #[arg(long)]
    lines: Option<u64>,

    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let intr = interruptor::Interruptor::new();
    let intr_clone = intr.clone();
    ctrlc::set_handler(move || {
        if intr_clone.is_set() {
            let exit_code = if cfg!(target_family = "unix") {
                // 128 (fatal error signal "n") + 2 (control-c is fatal error signal 2)
                130
            } else {
                // Windows code 3221225786
                // -1073741510 == C000013A
                -1073741510
            };
            std::process::exit(exit_code);
        } else {
            intr_clone.set();
        }
    })?;

    let catalogue = Catalogue::load();
    let mut settings = Settings::load(opts.settings.as_ref())?;

    let info = match opts.command {
        Command::Orbits(o) => run_orbits(&catalogue, &mut settings, o, &intr)?,
        Command::Spirograph(o) => run_spirograph(&catalogue, &mut settings, o, &intr)?,
        Command::List => {
            list(&catalogue);
            return Ok(());
        }
    };

    println!("Stopped at\n{info:#?}");

    Ok(())
}

fn run_orbits(
    catalogue: &Catalogue,
    settings: &mut Settings,
    opts: OrbitOpts,
    intr: &interruptor::Interruptor,
) -> Result<PlaybackInfo, Box<dyn std::error::Error>> {
    if let Some(k) = opts.star_system {
        if k != settings.star_system {
            settings.set_star_system(catalogue, k);
        }
    }
    if let Some(c) = opts.centre {
        settings.centre = c;
    }
    if !opts.bodies.is_empty() {
        settings.bodies = opts.bodies;
    }
    if let Some(d) = opts.orbit_duration {
        settings.orbit_duration_secs = std::time::Duration::from(d).as_secs_f64();
    }
    if let Some(n) = opts.orbit_count {
        settings.orbit_count = n;
    }
    if let Some(v) = opts.view {
        settings.view = v;
    }
    if opts.no_repeat {
        settings.repeat = false;
    }
    if opts.stats_body.is_some() {
        settings.stats_body = opts.stats_body;
    }
    if opts.seed.is_some() {
        settings.palette_seed = opts.seed;
    }

    let system = settings.system(catalogue);
    let request = settings.request(catalogue)?;
    let seed = settings.palette_seed.unwrap_or_else(rand::random);
    let palette = Palette::orbits(seed);

    let stats_body = settings
        .stats_body(catalogue)?
        .unwrap_or(request.bodies()[0]);

    println!(
        "{}: {} ({}) at the centre",
        system.kind(),
        system.body(request.centre()),
        centre_colour(system, request.centre())
    );
    for (slot, b) in request.bodies().iter().enumerate() {
        println!("  {} ({})", system.body(*b), palette.colour(slot));
    }

    let printer = FramePrinter {
        names: request.bodies().iter().map(|b| system.body(*b).name).collect(),
        dims: request.dims(),
        every: opts.print_every.max(1),
        json: opts.json,
    };
    let panel = StatsPanel::new(system, &request, stats_body);
    let mut driver =
        AnimationDriver::start(system, request, settings.driver_options(), (printer, panel));

    let every = opts.print_every.max(1) as u64;
    let info = run(&mut driver, intr, opts.frames, |d, tick| {
        if tick % every != 0 {
            return;
        }
        let panel = &d.consumer().1;
        if opts.json {
            if let Some(stats) = panel.latest() {
                if let Ok(s) = serde_json::to_string(stats) {
                    println!("{s}");
                }
            }
        } else {
            for (label, value) in panel.rows() {
                println!("    {label}: {value}");
            }
        }
    });

    let _ = driver.stop();
    Ok(info)
}

fn run_spirograph(
    catalogue: &Catalogue,
    settings: &mut Settings,
    opts: SpiroOpts,
    intr: &interruptor::Interruptor,
) -> Result<PlaybackInfo, Box<dyn std::error::Error>> {
    if let Some(k) = opts.star_system {
        if k != settings.star_system {
            settings.set_star_system(catalogue, k);
        }
    }
    if let Some(f) = opts.first {
        settings.spirograph.first = f;
    }
    if let Some(s) = opts.second {
        settings.spirograph.second = s;
    }
    if let Some(n) = opts.orbits {
        settings.spirograph.orbits = n;
    }
    if let Some(s) = opts.speed {
        settings.spirograph.speed = s;
    }
    if opts.seed.is_some() {
        settings.palette_seed = opts.seed;
    }

    let system = settings.system(catalogue);
    let request = settings.spiro_request(catalogue)?;
    let (c1, c2) = spiro_colours(settings.palette_seed.unwrap_or_else(rand::random));
    println!(
        "Spirograph with {} ({c1}) and {} ({c2})",
        system.body(request.first()),
        system.body(request.second())
    );

    let canvas = SpiroPrinter { json: opts.json };
    let mut driver = SpiroDriver::start(system, request, settings.driver_options(), canvas);
    if let Some(b) = spirograph::bounds(driver.pairs()) {
        info!(
            min_x = b.min.x,
            max_x = b.max.x,
            min_y = b.min.y,
            max_y = b.max.y,
            "Spirograph extents"
        );
    }

    let info = run(&mut driver, intr, opts.lines, |_, _| {});
    let _ = driver.stop();
    Ok(info)
}

/// Ticks `component` on its own interval until it finishes, the user
/// interrupts, or `max_ticks` is reached.
fn run<T, F>(
    component: &mut T,
    intr: &interruptor::Interruptor,
    max_ticks: Option<u64>,
    mut after_tick: F,
) -> PlaybackInfo
where
    T: AnimationComponent,
    F: FnMut(&T, u64),
{
    let mut ticker = Ticker::new(component.tick_interval());
    let mut playback = PlaybackInfo::new();

    loop {
        if intr.is_set() || component.is_finished() {
            break;
        }
        if max_ticks.map(|m| playback.tick >= m).unwrap_or(false) {
            break;
        }

        let late = ticker.wait();
        component.tick();
        playback.step(ticker.interval(), late);
        after_tick(component, playback.tick);
    }

    playback
}

fn list(catalogue: &Catalogue) {
    for system in catalogue.systems() {
        println!("{} ({})", system.kind(), system.kind().slug());
        for b in system.bodies() {
            let e = &b.elements;
            if b.is_central() {
                println!("  {:<20} star, {} earth masses", b.name, e.mass_earth_units);
            } else {
                println!(
                    "  {:<20} a={} AU, b={} AU, e={}, P={:.4} yr, i={:.4} rad",
                    b.name,
                    e.semi_major_axis_au,
                    e.semi_minor_axis_au,
                    e.eccentricity,
                    e.orbital_period_years,
                    e.inclination_rad
                );
            }
        }
    }
}

#[derive(Serialize)]
struct BodyRecord<'a> {
    body: &'a str,
    position: &'a [f64],
    angle: f64,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    bodies: Vec<BodyRecord<'a>>,
}

struct FramePrinter {
    /// In request slot order
    names: Vec<&'static str>,
    dims: Dimensionality,
    every: usize,
    json: bool,
}

impl FrameConsumer for FramePrinter {
    fn paths(&mut self, paths: &OrbitPaths) {
        if let Some(b) = paths.bounds() {
            info!(min = ?b.min, max = ?b.max, "View extents");
        }
    }

    fn render(&mut self, index: usize, frame: &Frame) {
        if index % self.every != 0 {
            return;
        }
        let bodies: Vec<BodyRecord<'_>> = frame
            .positions()
            .iter()
            .zip(frame.angles())
            .zip(self.names.iter())
            .map(|((p, angle), body)| BodyRecord {
                body: *body,
                position: self.dims.coords(p),
                angle: *angle,
            })
            .collect();

        if self.json {
            let record = FrameRecord {
                frame: index,
                bodies,
            };
            if let Ok(s) = serde_json::to_string(&record) {
                println!("{s}");
            }
        } else {
            println!("frame {index}");
            for b in bodies {
                println!("  {:<20} {:?} θ={:.4}", b.body, b.position, b.angle);
            }
        }
    }
}

struct SpiroPrinter {
    json: bool,
}

impl SpiroConsumer for SpiroPrinter {
    fn ellipses(&mut self, first: &[Point], second: &[Point]) {
        info!(
            first = first.len(),
            second = second.len(),
            "Orbit ellipses sampled"
        );
    }

    fn line(&mut self, index: usize, pair: &PointPair) {
        if self.json {
            if let Ok(s) = serde_json::to_string(pair) {
                println!("{s}");
            }
        } else {
            println!(
                "line {index}: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
                pair.first.x, pair.first.y, pair.second.x, pair.second.y
            );
        }
    }

    fn progress(&mut self, progress: SpiroProgress) {
        if progress.line_index % spirograph::LINES_PER_ORBIT == 0 {
            println!(
                "Completed orbits: {}, lines: {}",
                progress.completed_orbits, progress.line_index
            );
        }
    }
}

mod interruptor {
    use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    #[repr(transparent)]
    pub struct Interruptor(Arc<AtomicBool>);

    impl Interruptor {
        pub fn new() -> Self {
            Interruptor(Arc::new(AtomicBool::new(false)))
        }

        pub fn set(&self) {
            self.0.store(true, SeqCst);
        }

        pub fn is_set(&self) -> bool {
            self.0.load(SeqCst)
        }
    }

    impl Default for Interruptor {
        fn default() -> Self {
            Self::new()
        }
    }
}
