/// Match scorer module
///
/// The "Top Matched" quiz: 8 fixed questions, additive scoring of every
/// listing, and a ranked top-3.

pub mod questions;
pub mod scorer;

pub use questions::{QuizAnswers, QuizQuestion, QuizState, QUESTIONS};
pub use scorer::{score, top_matches, MAX_SCORE};
