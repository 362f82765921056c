// cargo run --bin spiro-lines --release -- --first Venus --second Earth --orbits 8 /tmp/spiro.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use ephemeris::prelude::Catalogue;
use orrery_lib::{settings::Settings, spirograph::sample_pairs};

/// Write spirograph chords as `line x1 y1 x2 y2` rows
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Settings toml file.
    ///
    /// The default settings are used when not provided.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(short = 'a', long)]
    first: Option<String>,

    #[arg(short = 'b', long)]
    second: Option<String>,

    /// Orbits of the slower body
    #[arg(short = 'n', long)]
    orbits: Option<u32>,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let catalogue = Catalogue::load();
    let mut settings = Settings::load(opts.settings)?;
    if let Some(f) = opts.first {
        settings.spirograph.first = f;
    }
    if let Some(s) = opts.second {
        settings.spirograph.second = s;
    }
    if let Some(n) = opts.orbits {
        settings.spirograph.orbits = n;
    }

    let system = settings.system(&catalogue);
    let request = settings.spiro_request(&catalogue)?;
    let pairs = sample_pairs(
        system,
        request.first(),
        request.second(),
        request.orbit_count(),
        request.line_count(),
    );

    let mut output = File::create(opts.output)?;

    for (index, pair) in pairs.iter().enumerate() {
        writeln!(
            &mut output,
            "{} {} {} {} {}",
            index, pair.first.x, pair.first.y, pair.second.x, pair.second.y
        )?;
    }

    Ok(())
}
