pub mod features;
pub mod labels;
pub mod token;

// Re-export core types for convenience
pub use features::{FeatureError, Morph, Number, Person, Tense};
pub use token::{capitalize, decapitalize, Token, TokenFlags};
