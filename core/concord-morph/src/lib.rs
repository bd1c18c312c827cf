pub mod conjugate;
pub mod corrections;
pub mod inflect;
pub mod numerals;
pub mod paradigm;
pub mod reinflect;
pub mod tables;

use concord_protocol::Token;
use thiserror::Error;

pub use numerals::is_number;
pub use paradigm::{Cell, Condition, Homophone, Paradigm};
pub use reinflect::{pluralize, reinflect, renumber, singularize, Inflection, NoContext, VerbContext};
pub use tables::PartitiveKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorphError {
    #[error("cannot inflect {text:?}: {reason}")]
    NotInflectable { text: String, reason: &'static str },

    #[error("reinflection of {text:?} failed: {reason}")]
    ReinflectionFailed { text: String, reason: &'static str },
}

impl MorphError {
    pub fn not_inflectable(token: &Token, reason: &'static str) -> Self {
        MorphError::NotInflectable { text: token.text.clone(), reason }
    }

    pub fn failed(token: &Token, reason: &'static str) -> Self {
        MorphError::ReinflectionFailed { text: token.text.clone(), reason }
    }
}

pub type Result<T> = std::result::Result<T, MorphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_token() {
        let token = Token::new(0, "walking");
        let err = MorphError::not_inflectable(&token, "participle");
        assert_eq!(err.to_string(), "cannot inflect \"walking\": participle");
    }
}
