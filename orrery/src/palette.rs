//! Colour assignment for drawn bodies.

use ephemeris::prelude::{BodyIndex, StarSystem};
use oorandom::Rand64;

pub const ORBIT_COLOURS: [&str; 9] = [
    "black",
    "orange",
    "green",
    "blue",
    "darkviolet",
    "cyan",
    "lime",
    "pink",
    "indigo",
];

pub const SPIRO_COLOURS: [&str; 6] = ["black", "red", "orange", "green", "blue", "darkviolet"];

/// Marker colour for whatever sits at the origin
pub fn centre_colour(system: &StarSystem, centre: BodyIndex) -> &'static str {
    if system.is_sun(centre) {
        "yellow"
    } else {
        "red"
    }
}

/// A seeded shuffle of [`ORBIT_COLOURS`], indexed by request slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<&'static str>,
}

impl Palette {
    pub fn orbits(seed: u64) -> Self {
        let mut colours = ORBIT_COLOURS.to_vec();
        shuffle(&mut Rand64::new(seed.into()), &mut colours);
        Palette { colours }
    }

    /// Colours repeat once a run has more bodies than colours.
    pub fn colour(&self, slot: usize) -> &'static str {
        self.colours[slot % self.colours.len()]
    }

    pub fn colours(&self) -> &[&'static str] {
        &self.colours
    }
}

/// Two distinct colours for the spirograph's bodies
pub fn spiro_colours(seed: u64) -> (&'static str, &'static str) {
    let mut colours = SPIRO_COLOURS.to_vec();
    shuffle(&mut Rand64::new(seed.into()), &mut colours);
    (colours[0], colours[1])
}

fn shuffle<T>(prng: &mut Rand64, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = prng.rand_range(0..(i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}
