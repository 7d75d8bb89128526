/// Quiz questions and answer collection
///
/// The quiz is a fixed dialogue of 8 questions answered one message at
/// a time. QuizState tracks how far along the dialogue is; the answer
/// set only becomes available once every question is answered.

/// One quiz question. `choices` is empty for free-text questions.
#[derive(Debug, Clone, Copy)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub choices: &'static [&'static str],
}

pub const QUESTIONS: [QuizQuestion; 8] = [
    QuizQuestion {
        prompt: "What's your maximum budget (EGP)?",
        choices: &[],
    },
    QuizQuestion {
        prompt: "How many bedrooms do you need?",
        choices: &["1", "2", "3+"],
    },
    QuizQuestion {
        prompt: "Preferred area(s)? (comma separated)",
        choices: &[],
    },
    QuizQuestion {
        prompt: "Are you looking for a new or resale unit?",
        choices: &["New", "Resale", "Doesn't matter"],
    },
    QuizQuestion {
        prompt: "What's more important to you?",
        choices: &["Area size", "Price", "Location", "Amenities"],
    },
    QuizQuestion {
        prompt: "Preferred type?",
        choices: &["Apartment", "Villa", "Duplex", "Studio"],
    },
    QuizQuestion {
        prompt: "Minimum required amenities? (comma separated, e.g. Garden, Parking, Pool, Elevator)",
        choices: &[],
    },
    QuizQuestion {
        prompt: "What's your intended use?",
        choices: &["Living", "Investment", "Rental"],
    },
];

/// Progress through the quiz dialogue.
#[derive(Debug, Default)]
pub struct QuizState {
    answers: Vec<String>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt for the question awaiting an answer.
    pub fn prompt(&self) -> String {
        let number = self.answers.len() + 1;
        let question = &QUESTIONS[self.answers.len().min(QUESTIONS.len() - 1)];
        if question.choices.is_empty() {
            format!("Q{}: {}", number, question.prompt)
        } else {
            format!(
                "Q{}: {} (Choices: {})",
                number,
                question.prompt,
                question.choices.join(", ")
            )
        }
    }

    pub fn record_answer(&mut self, answer: &str) {
        if !self.is_complete() {
            self.answers.push(answer.trim().to_string());
        }
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= QUESTIONS.len()
    }

    /// The collected answer set, once all questions are answered.
    pub fn into_answers(self) -> Option<QuizAnswers> {
        if !self.is_complete() {
            return None;
        }
        let mut answers = self.answers.into_iter();
        let mut next = move || answers.next().unwrap_or_default();
        Some(QuizAnswers {
            budget: next(),
            bedrooms: next(),
            areas: next(),
            new_or_resale: next(),
            priority: next(),
            property_type: next(),
            amenities: next(),
            intended_use: next(),
        })
    }
}

/// The 8 quiz answers, in question order. Transient: consumed by the
/// scorer and discarded.
#[derive(Debug, Clone)]
pub struct QuizAnswers {
    pub budget: String,
    pub bedrooms: String,
    pub areas: String,
    pub new_or_resale: String,
    pub priority: String,
    pub property_type: String,
    pub amenities: String,
    pub intended_use: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_numbers_and_choices() {
        let mut quiz = QuizState::new();
        assert_eq!(quiz.prompt(), "Q1: What's your maximum budget (EGP)?");

        quiz.record_answer("2000000");
        assert!(quiz.prompt().starts_with("Q2:"));
        assert!(quiz.prompt().contains("Choices: 1, 2, 3+"));
    }

    #[test]
    fn test_completes_after_eight_answers() {
        let mut quiz = QuizState::new();
        for i in 0..8 {
            assert!(!quiz.is_complete());
            quiz.record_answer(&format!("answer {}", i));
        }
        assert!(quiz.is_complete());

        let answers = quiz.into_answers().unwrap();
        assert_eq!(answers.budget, "answer 0");
        assert_eq!(answers.intended_use, "answer 7");
    }

    #[test]
    fn test_incomplete_quiz_has_no_answers() {
        let mut quiz = QuizState::new();
        quiz.record_answer("2000000");
        assert!(quiz.into_answers().is_none());
    }

    #[test]
    fn test_answers_are_trimmed() {
        let mut quiz = QuizState::new();
        quiz.record_answer("  2000000  ");
        for _ in 0..7 {
            quiz.record_answer("x");
        }
        assert_eq!(quiz.into_answers().unwrap().budget, "2000000");
    }
}
