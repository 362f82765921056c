use crate::star_system::StarSystemKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("'{body}' is not a body of the {system}")]
    UnknownBody { body: String, system: StarSystemKind },

    #[error("Unknown star system '{0}'")]
    UnknownStarSystem(String),
}
