use crate::elements::OrbitalElements;
use derive_more::Display;

/// Position of a body in its star system's table
pub type BodyIndex = usize;

#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(fmt = "{}", "name")]
pub struct Body {
    pub index: BodyIndex,

    /// Short catalogue key, e.g. "MERCURY" or "g"
    pub key: &'static str,

    /// Display name, e.g. "Mercury" or "Tau Ceti g"
    pub name: &'static str,

    pub elements: OrbitalElements,
}

impl Body {
    /// Case-insensitive match against either the key or the display name.
    pub fn matches(&self, id: &str) -> bool {
        let id = id.trim();
        self.key.eq_ignore_ascii_case(id) || self.name.eq_ignore_ascii_case(id)
    }

    pub fn is_central(&self) -> bool {
        self.elements.is_central()
    }
}
