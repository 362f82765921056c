pub use crate::body::{Body, BodyIndex};
pub use crate::catalogue::Catalogue;
pub use crate::elements::{OrbitalElements, AU_METERS, EARTH_MASS_KG};
pub use crate::error::LookupError;
pub use crate::star_system::{StarSystem, StarSystemKind};
