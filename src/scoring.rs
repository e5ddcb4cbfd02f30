use crate::code::{Code, Feedback};

/// Scores `candidate` as if it were the secret behind `guess`.
///
/// `a` counts positions holding the same digit. `b` counts, among the other positions, the
/// candidate digits that appear anywhere in the guess. Membership is tested without consuming
/// digits, so a digit repeated in the candidate can count more than once against a single
/// occurrence in the guess. Saved games were filtered with this rule; keep it.
///
/// # Panics
///
/// Panics if the codes have different lengths.
#[must_use]
pub fn score(guess: &Code, candidate: &Code) -> Feedback {
    assert_eq!(
        guess.len(),
        candidate.len(),
        "guess {guess} and candidate {candidate} must have the same length"
    );
    let mut feedback = Feedback::new(0, 0);
    for (&guessed, &digit) in guess.digits().iter().zip(candidate.digits()) {
        if guessed == digit {
            feedback.a += 1;
        } else if guess.contains(digit) {
            feedback.b += 1;
        }
    }
    feedback
}

/// Keeps the candidates that would have produced `feedback` for `guess`, in their original order.
#[must_use]
pub fn filter_candidates(candidates: &[Code], guess: &Code, feedback: Feedback) -> Vec<Code> {
    candidates
        .iter()
        .filter(|candidate| score(guess, candidate) == feedback)
        .cloned()
        .collect()
}
