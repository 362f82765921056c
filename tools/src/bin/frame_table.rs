// cargo run --bin frame-table --release -- --settings settings/inner_planets.toml --view 3d /tmp/frames.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use ephemeris::prelude::Catalogue;
use orrery_lib::{kepler::Dimensionality, sampler::FrameTable, settings::Settings};

/// Write every frame of an orbit animation as `frame body x y z angle` rows
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Settings toml file.
    ///
    /// The default settings are used when not provided.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the centre body
    #[arg(short = 'c', long)]
    centre: Option<String>,

    /// Override the view (2d, 3d)
    #[arg(short = 'v', long)]
    view: Option<Dimensionality>,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let catalogue = Catalogue::load();
    let mut settings = Settings::load(opts.settings)?;
    if let Some(c) = opts.centre {
        settings.centre = c;
    }
    if let Some(v) = opts.view {
        settings.view = v;
    }

    let system = settings.system(&catalogue);
    let request = settings.request(&catalogue)?;
    let table = FrameTable::build(system, &request);

    let mut output = File::create(opts.output)?;

    for (index, frame) in table.frames().iter().enumerate() {
        for ((body, p), angle) in table
            .bodies()
            .iter()
            .zip(frame.positions())
            .zip(frame.angles())
        {
            writeln!(
                &mut output,
                "{} {} {} {} {} {}",
                index,
                system.body(*body).key,
                p.x,
                p.y,
                p.z,
                angle
            )?;
        }
    }

    Ok(())
}
