pub mod context;
pub mod filter;
pub mod metadata;
pub mod number;
pub mod question;
pub mod resolver;
pub mod structure;
pub mod transform;

use concord_morph::MorphError;
use concord_tree::TreeError;
use thiserror::Error;

pub use context::TokenContext;
pub use filter::{accepts, accepts_parsed, check_parsed, check_string, DistractorPolicy, FilterConfig, FilterRejection};
pub use metadata::Metadata;
pub use number::Role;
pub use question::{can_form_question, eligibility, to_polar_question, Rejection};
pub use resolver::{resolve, Relations, Resolver};
pub use structure::{Structure, StructurePath};
pub use transform::{
    reinflect_main_verbs, renumber_distractors, renumber_distractors_to_subject, renumber_subject, to_past_tense,
    to_present_tense,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("sentence has no main verb")]
    NoMainVerb,

    #[error("main verb has no subject")]
    NoMainSubject,

    #[error("cannot form a polar question: {0}")]
    QuestionFormationFailed(Rejection),

    #[error(transparent)]
    Morph(#[from] MorphError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, GrammarError>;
