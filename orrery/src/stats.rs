//! Derived statistics for one selected body, refreshed every frame.

use ephemeris::prelude::{BodyIndex, StarSystem};
use serde::Serialize;
use tracing::warn;

use crate::{
    driver::FrameConsumer,
    kepler::{radius, Dimensionality, Point},
    request::SimulationRequest,
    sampler::Frame,
    units::{Angle, AngularVelocity, Length, Mass, Time, Velocity},
};

/// Gravitational constant [m^3 kg^-1 s^-2]
pub const G: f64 = 6.67E-11;

/// Labels in display order
pub const LABELS: [&str; 12] = [
    "Coordinates",
    "Mass",
    "Angular velocity",
    "Linear velocity",
    "Distance from centre",
    "Distance from star",
    "Orbital angle",
    "Eccentricity",
    "Semi-major axis",
    "Semi-minor axis",
    "Orbital period",
    "Inclination angle",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrbitStats {
    pub body: &'static str,
    /// Frame coordinates [AU], only the meaningful ones
    pub coordinates: Vec<f64>,
    pub mass: Mass,
    pub angular_velocity: Option<AngularVelocity>,
    pub linear_velocity: Option<Velocity>,
    pub distance_from_centre: Length,
    pub distance_from_star: Length,
    pub orbital_angle: Angle,
    pub eccentricity: f64,
    pub semi_major_axis: Length,
    pub semi_minor_axis: Length,
    pub orbital_period: Time,
    pub inclination: Angle,
}

impl OrbitStats {
    /// Statistics for `body` at frame angle `angle` and frame position `position`.
    ///
    /// Selecting the star reports the centre body's elements instead.
    pub fn derive(
        system: &StarSystem,
        body: BodyIndex,
        centre: BodyIndex,
        angle: f64,
        position: &Point,
        dims: Dimensionality,
    ) -> Self {
        let subject = system.body(if system.is_sun(body) { centre } else { body });
        let el = &subject.elements;

        let theta = Angle::from_radians(angle).normalized();
        let r = Length::from_au(radius(theta.as_radians(), el));
        let a = Length::from_au(el.semi_major_axis_au);
        let star_mass = Mass::from_earth_masses(system.sun().elements.mass_earth_units);

        let linear_velocity = vis_viva(star_mass, r, a);
        let angular_velocity = linear_velocity
            .filter(|_| r.as_meters() != 0.0)
            .map(|v| v / r);

        OrbitStats {
            body: subject.name,
            coordinates: dims.coords(position).to_vec(),
            mass: Mass::from_earth_masses(el.mass_earth_units),
            angular_velocity,
            linear_velocity,
            distance_from_centre: Length::from_au(position.coords.norm()),
            distance_from_star: r,
            orbital_angle: theta,
            eccentricity: el.eccentricity,
            semi_major_axis: a,
            semi_minor_axis: Length::from_au(el.semi_minor_axis_au),
            orbital_period: Time::from_years(el.orbital_period_years),
            inclination: Angle::from_radians(el.inclination_rad),
        }
    }
}

/// v = sqrt(G M (2/r - 1/a)), or None where that is undefined
pub fn vis_viva(star_mass: Mass, r: Length, a: Length) -> Option<Velocity> {
    if a.as_meters() == 0.0 || r.as_meters() == 0.0 {
        return None;
    }
    let radicand =
        G * star_mass.as_kilograms() * (2.0 / r.as_meters() - 1.0 / a.as_meters());
    (radicand.is_finite() && radicand >= 0.0)
        .then(|| Velocity::from_meters_per_second(radicand.sqrt()))
}

/// Stats for one body, fed by a driver's stats callback.
///
/// Keeps the last good value of every optional field so a degenerate frame
/// does not blank the display.
pub struct StatsPanel<'a> {
    system: &'a StarSystem,
    body: BodyIndex,
    centre: BodyIndex,
    slot: Option<usize>,
    dims: Dimensionality,
    latest: Option<OrbitStats>,
}

impl<'a> StatsPanel<'a> {
    pub fn new(system: &'a StarSystem, request: &SimulationRequest, body: BodyIndex) -> Self {
        let slot = request.slot(body);
        if slot.is_none() {
            warn!(
                body = %system.body(body),
                "Stats body is not animated, statistics will stay empty"
            );
        }
        StatsPanel {
            system,
            body,
            centre: request.centre(),
            slot,
            dims: request.dims(),
            latest: None,
        }
    }

    pub fn latest(&self) -> Option<&OrbitStats> {
        self.latest.as_ref()
    }

    /// Label and display text per field, `-` where nothing is known yet
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let Some(s) = self.latest.as_ref() else {
            return LABELS.iter().map(|l| (*l, "-".to_string())).collect();
        };
        let values = [
            s.coordinates
                .iter()
                .map(|c| format!("{c:.6} a.u."))
                .collect::<Vec<_>>()
                .join(", "),
            format!("{:.6e} kg", s.mass.as_kilograms()),
            s.angular_velocity
                .map(|w| format!("{:.10} rad/s", w.as_radians_per_second()))
                .unwrap_or_else(|| "-".to_string()),
            s.linear_velocity
                .map(|v| format!("{:.6} m/s", v.as_meters_per_second()))
                .unwrap_or_else(|| "-".to_string()),
            format!("{:.6} a.u.", s.distance_from_centre.as_au()),
            format!("{:.6} a.u.", s.distance_from_star.as_au()),
            format!("{:.6} rad", s.orbital_angle.as_radians()),
            format!("{}", s.eccentricity),
            format!("{:.6} a.u.", s.semi_major_axis.as_au()),
            format!("{:.6} a.u.", s.semi_minor_axis.as_au()),
            format!("{:.6} years", s.orbital_period.as_years()),
            format!("{:.6} rad", s.inclination.as_radians()),
        ];
        LABELS.into_iter().zip(values).collect()
    }
}

impl FrameConsumer for StatsPanel<'_> {
    fn render(&mut self, _index: usize, _frame: &Frame) {}

    fn stats(&mut self, angles: &[f64], positions: &[Point]) {
        let Some(slot) = self.slot else {
            return;
        };
        let mut next = OrbitStats::derive(
            self.system,
            self.body,
            self.centre,
            angles[slot],
            &positions[slot],
            self.dims,
        );
        if let Some(prev) = self.latest.as_ref() {
            next.linear_velocity = next.linear_velocity.or(prev.linear_velocity);
            next.angular_velocity = next.angular_velocity.or(prev.angular_velocity);
        }
        self.latest = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        driver::{AnimationDriver, DriverOptions},
        kepler::body_position,
    };
    use approx::assert_relative_eq;
    use ephemeris::prelude::{Catalogue, OrbitalElements, StarSystemKind, AU_METERS};
    use std::f64::consts::PI;

    fn solar() -> StarSystem {
        Catalogue::load()
            .system(StarSystemKind::SolarSystem)
            .clone()
    }

    #[test]
    fn star_about_itself_is_degenerate_not_an_error() {
        let sys = solar();
        let s = OrbitStats::derive(
            &sys,
            StarSystem::SUN,
            StarSystem::SUN,
            0.0,
            &Point::origin(),
            Dimensionality::TwoD,
        );
        assert_eq!(s.body, "Sun");
        assert!(s.linear_velocity.is_none());
        assert!(s.angular_velocity.is_none());
        assert_relative_eq!(s.distance_from_star.as_meters(), 0.0);
        assert_eq!(s.coordinates, vec![0.0, 0.0]);
    }

    #[test]
    fn star_selected_reports_the_centre() {
        let sys = solar();
        let earth = sys.lookup("Earth").unwrap().index;
        let s = OrbitStats::derive(
            &sys,
            StarSystem::SUN,
            earth,
            0.0,
            &Point::new(-1.0, 0.0, 0.0),
            Dimensionality::TwoD,
        );
        assert_eq!(s.body, "Earth");
        assert!(s.linear_velocity.is_some());
        assert_relative_eq!(s.distance_from_centre.as_au(), 1.0);
    }

    #[test]
    fn faster_at_perihelion_than_aphelion() {
        let sys = solar();
        let mercury = sys.lookup("Mercury").unwrap().index;
        let el = sys.elements(mercury);
        let at = |theta: f64| {
            OrbitStats::derive(
                &sys,
                mercury,
                StarSystem::SUN,
                theta,
                &body_position(theta, el, Dimensionality::TwoD),
                Dimensionality::TwoD,
            )
        };
        // r is smallest at theta = pi for r = b / (1 - e cos θ)
        let peri = at(PI);
        let apo = at(0.0);
        assert!(peri.distance_from_star.as_meters() < apo.distance_from_star.as_meters());
        let (vp, va) = (
            peri.linear_velocity.unwrap().as_meters_per_second(),
            apo.linear_velocity.unwrap().as_meters_per_second(),
        );
        assert!(vp > va);
        assert!(
            peri.angular_velocity.unwrap().as_radians_per_second()
                > apo.angular_velocity.unwrap().as_radians_per_second()
        );
    }

    #[test]
    fn earth_moves_at_about_thirty_km_per_second() {
        let sys = solar();
        let sun_mass = Mass::from_earth_masses(sys.sun().elements.mass_earth_units);
        let v = vis_viva(sun_mass, Length::from_au(1.0), Length::from_au(1.0)).unwrap();
        assert_relative_eq!(v.as_meters_per_second(), 29_800.0, max_relative = 0.01);
        assert!(vis_viva(sun_mass, Length::from_au(3.0), Length::from_au(1.0)).is_none());
        assert!(vis_viva(sun_mass, Length::from_au(1.0), Length::from_meters(0.0)).is_none());
    }

    #[test]
    fn angle_is_wrapped() {
        let sys = solar();
        let earth = sys.lookup("Earth").unwrap().index;
        let s = OrbitStats::derive(
            &sys,
            earth,
            StarSystem::SUN,
            5.0 * PI,
            &Point::new(-1.0, 0.0, 0.0),
            Dimensionality::ThreeD,
        );
        assert_relative_eq!(s.orbital_angle.as_radians(), PI, epsilon = 1e-12);
        assert_eq!(s.coordinates.len(), 3);
        assert_relative_eq!(s.semi_major_axis.as_meters(), AU_METERS);
    }

    #[test]
    fn panel_follows_the_driver() {
        let sys = solar();
        let earth = sys.lookup("Earth").unwrap().index;
        let req = SimulationRequest::new(
            &sys,
            "Sun",
            &["Venus", "Earth"],
            1.0,
            1,
            Dimensionality::TwoD,
        )
        .unwrap();
        let panel = StatsPanel::new(&sys, &req, earth);
        assert!(panel.rows().iter().all(|(_, v)| v == "-"));

        let mut d = AnimationDriver::start(&sys, req, DriverOptions::default(), panel);
        d.tick();
        let rows = d.consumer().rows();
        assert_eq!(rows.len(), LABELS.len());
        assert_eq!(rows[0].0, "Coordinates");
        assert!(rows[3].1.ends_with("m/s"));
        assert_eq!(d.consumer().latest().map(|s| s.body), Some("Earth"));
    }

    #[test]
    fn panel_keeps_the_last_good_velocity() {
        // r = b / (1 - e cos θ) runs from 2/3 AU at θ = π to 2 AU at θ = 0,
        // past 2a where the vis-viva radicand turns negative
        let sys = StarSystem::new(
            StarSystemKind::SolarSystem,
            ("SUN", "Sun", OrbitalElements::central(332837.0)),
            vec![(
                "X",
                "X",
                OrbitalElements::with_axes(0.5, 1.0, 0.5, 1.0, 0.0, 1.0),
            )],
        );
        let req =
            SimulationRequest::new(&sys, "SUN", &["X"], 1.0, 1, Dimensionality::TwoD).unwrap();
        let el = sys.elements(1);
        let mut panel = StatsPanel::new(&sys, &req, 1);

        panel.stats(&[PI], &[body_position(PI, el, Dimensionality::TwoD)]);
        let good = panel.latest().unwrap().clone();
        let (v, w) = (
            good.linear_velocity.unwrap(),
            good.angular_velocity.unwrap(),
        );

        let degenerate = OrbitStats::derive(
            &sys,
            1,
            StarSystem::SUN,
            0.0,
            &body_position(0.0, el, Dimensionality::TwoD),
            Dimensionality::TwoD,
        );
        assert!(degenerate.linear_velocity.is_none());
        assert!(degenerate.angular_velocity.is_none());

        panel.stats(&[0.0], &[body_position(0.0, el, Dimensionality::TwoD)]);
        let latest = panel.latest().unwrap();
        assert_eq!(latest.linear_velocity, Some(v));
        assert_eq!(latest.angular_velocity, Some(w));
        assert_relative_eq!(latest.distance_from_star.as_au(), 2.0, epsilon = 1e-12);

        let rows = panel.rows();
        assert_eq!(rows[2].0, "Angular velocity");
        assert_eq!(rows[3].0, "Linear velocity");
        assert_ne!(rows[2].1, "-");
        assert_ne!(rows[3].1, "-");
    }

    #[test]
    fn panel_for_a_hidden_body_stays_empty() {
        let sys = solar();
        let mars = sys.lookup("Mars").unwrap().index;
        let req =
            SimulationRequest::new(&sys, "Sun", &["Earth"], 1.0, 1, Dimensionality::TwoD).unwrap();
        let mut panel = StatsPanel::new(&sys, &req, mars);
        panel.stats(&[0.0], &[Point::new(1.0, 0.0, 0.0)]);
        assert!(panel.latest().is_none());
    }
}
