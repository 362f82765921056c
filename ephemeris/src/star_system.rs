use crate::{
    body::{Body, BodyIndex},
    elements::OrbitalElements,
    error::LookupError,
};
use derive_more::Display;
use std::str::FromStr;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display)]
pub enum StarSystemKind {
    #[default]
    #[display(fmt = "Solar System")]
    SolarSystem,
    #[display(fmt = "Tau Ceti system")]
    TauCeti,
    #[display(fmt = "HD 219134 system")]
    Hd219134,
    #[display(fmt = "Proxima Centauri system")]
    ProximaCentauri,
}

impl StarSystemKind {
    pub const ALL: [StarSystemKind; 4] = [
        StarSystemKind::SolarSystem,
        StarSystemKind::TauCeti,
        StarSystemKind::Hd219134,
        StarSystemKind::ProximaCentauri,
    ];

    /// Identifier used in settings files and on the command line
    pub const fn slug(self) -> &'static str {
        use StarSystemKind::*;
        match self {
            SolarSystem => "solar-system",
            TauCeti => "tau-ceti",
            Hd219134 => "hd-219134",
            ProximaCentauri => "proxima-centauri",
        }
    }
}

impl FromStr for StarSystemKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['_', ' '], "-");
        StarSystemKind::ALL
            .into_iter()
            .find(|k| k.slug() == norm || k.slug().replace('-', "") == norm.replace('-', ""))
            .ok_or_else(|| LookupError::UnknownStarSystem(s.to_string()))
    }
}

/// A closed set of bodies orbiting one star.
///
/// The star is always index 0. Built once from the static catalogue
/// tables and never mutated afterwards.
#[derive(Clone, PartialEq, Debug)]
pub struct StarSystem {
    kind: StarSystemKind,
    bodies: Vec<Body>,
}

impl StarSystem {
    pub const SUN: BodyIndex = 0;

    pub fn new(
        kind: StarSystemKind,
        star: (&'static str, &'static str, OrbitalElements),
        planets: Vec<(&'static str, &'static str, OrbitalElements)>,
    ) -> Self {
        let bodies = std::iter::once(star)
            .chain(planets)
            .enumerate()
            .map(|(index, (key, name, elements))| Body {
                index,
                key,
                name,
                elements,
            })
            .collect();
        Self { kind, bodies }
    }

    pub fn kind(&self) -> StarSystemKind {
        self.kind
    }

    pub fn sun(&self) -> &Body {
        &self.bodies[Self::SUN]
    }

    pub fn is_sun(&self, index: BodyIndex) -> bool {
        index == Self::SUN
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Everything except the star, in catalogue order
    pub fn planets(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().skip(1)
    }

    /// Panics on an index that did not come from this system.
    pub fn body(&self, index: BodyIndex) -> &Body {
        &self.bodies[index]
    }

    pub fn get(&self, index: BodyIndex) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn elements(&self, index: BodyIndex) -> &OrbitalElements {
        &self.bodies[index].elements
    }

    pub fn lookup(&self, id: &str) -> Result<&Body, LookupError> {
        self.bodies
            .iter()
            .find(|b| b.matches(id))
            .ok_or_else(|| LookupError::UnknownBody {
                body: id.to_string(),
                system: self.kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind() {
        assert_eq!(
            "solar-system".parse::<StarSystemKind>(),
            Ok(StarSystemKind::SolarSystem)
        );
        assert_eq!(
            "HD_219134".parse::<StarSystemKind>(),
            Ok(StarSystemKind::Hd219134)
        );
        assert_eq!(
            "Tau Ceti".parse::<StarSystemKind>(),
            Ok(StarSystemKind::TauCeti)
        );
        assert!("alpha-centauri".parse::<StarSystemKind>().is_err());
    }

    #[test]
    fn lookup_by_key_or_name() {
        let sys = StarSystem::new(
            StarSystemKind::TauCeti,
            ("TAU_CETI", "Tau Ceti", OrbitalElements::central(260_000.0)),
            vec![(
                "g",
                "Tau Ceti g",
                OrbitalElements::from_semi_major(0.133, 0.06, 20.0 / 365.0, 0.0, 1.75),
            )],
        );
        assert_eq!(sys.sun().key, "TAU_CETI");
        assert_eq!(sys.lookup("g").unwrap().index, 1);
        assert_eq!(sys.lookup("tau ceti g").unwrap().index, 1);
        assert_eq!(sys.lookup(" Tau Ceti ").unwrap().index, StarSystem::SUN);
        assert_eq!(
            sys.lookup("x"),
            Err(LookupError::UnknownBody {
                body: "x".to_string(),
                system: StarSystemKind::TauCeti
            })
        );
        assert_eq!(sys.planets().count(), 1);
    }
}
