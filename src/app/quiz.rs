//! Quiz run state: selection, confirmation, scoring and results

use crate::study::Question;

/// Transient state of one pass through a quiz
///
/// Holds no question data; callers pass the current question (or the quiz
/// length) to the operations that need it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRun {
    /// Zero-based index of the question on screen
    pub current: usize,
    /// Tentatively selected option index
    pub selected: Option<usize>,
    /// Whether the current question has been confirmed
    pub answered: bool,
    /// Correct answers so far
    pub score: usize,
    /// Whether the final results are on screen
    pub show_results: bool,
    /// Outcome of each confirmed question, in order
    pub outcomes: Vec<bool>,
}

impl QuizRun {
    pub fn new() -> Self {
        Self::default()
    }

    fn accepts_selection(&self) -> bool {
        !self.answered && !self.show_results
    }

    /// Record `index` as the tentative answer, replacing any earlier pick
    pub fn select(&mut self, index: usize, question: &Question) {
        if self.accepts_selection() && index < question.options.len() {
            self.selected = Some(index);
        }
    }

    /// Move the selection down one option, wrapping at the end
    pub fn select_next(&mut self, question: &Question) {
        let count = question.options.len();
        if !self.accepts_selection() || count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1) % count,
        });
    }

    /// Move the selection up one option, wrapping at the start
    pub fn select_previous(&mut self, question: &Question) {
        let count = question.options.len();
        if !self.accepts_selection() || count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None | Some(0) => count - 1,
            Some(i) => i - 1,
        });
    }

    /// Whether "confirm" is currently allowed
    pub fn can_confirm(&self) -> bool {
        self.accepts_selection() && self.selected.is_some()
    }

    /// Lock in the selected answer
    ///
    /// Returns whether it was correct, or `None` when nothing was confirmed
    /// (no selection, or already answered).
    pub fn confirm(&mut self, question: &Question) -> Option<bool> {
        if !self.can_confirm() {
            return None;
        }
        let selected = self.selected?;
        let correct = question.is_correct(selected);
        self.answered = true;
        if correct {
            self.score += 1;
        }
        self.outcomes.push(correct);
        Some(correct)
    }

    /// Move past an answered question, or show results after the last one
    pub fn advance(&mut self, total: usize) {
        if !self.answered || self.show_results {
            return;
        }
        self.selected = None;
        self.answered = false;
        if self.current + 1 < total {
            self.current += 1;
        } else {
            self.show_results = true;
        }
    }

    /// Whether the current question is the final one
    pub fn is_last(&self, total: usize) -> bool {
        self.current + 1 >= total
    }

    /// Score as a whole percentage, rounding halves up
    pub fn percentage(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((200 * self.score + total) / (2 * total)) as u32
    }

    /// Forget everything and start again from the first question
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::model::fixtures;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn confirm_requires_selection() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        assert_eq!(run.confirm(&q), None);
        assert!(!run.answered);
    }

    #[test]
    fn reselecting_overwrites_tentative_choice() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select(0, &q);
        run.select(1, &q);
        assert_eq!(run.selected, Some(1));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select(9, &q);
        assert_eq!(run.selected, None);
    }

    #[test]
    fn correct_answer_scores_exactly_once() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select(1, &q);
        assert_eq!(run.confirm(&q), Some(true));
        assert_eq!(run.confirm(&q), None);
        assert_eq!(run.confirm(&q), None);
        assert_eq!(run.score, 1);
        assert_eq!(run.outcomes, vec![true]);
    }

    #[test]
    fn wrong_answer_leaves_score() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select(3, &q);
        assert_eq!(run.confirm(&q), Some(false));
        assert_eq!(run.score, 0);
    }

    #[test]
    fn selection_locked_after_confirm() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select(0, &q);
        run.confirm(&q);
        run.select(1, &q);
        run.select_next(&q);
        assert_eq!(run.selected, Some(0));
    }

    #[test]
    fn unmatched_correct_answer_never_scores() {
        let q = fixtures::question(1, "not listed");
        let mut run = QuizRun::new();
        for i in 0..q.options.len() {
            run.restart();
            run.select(i, &q);
            assert_eq!(run.confirm(&q), Some(false));
        }
    }

    #[test]
    fn cursor_selection_wraps() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select_previous(&q);
        assert_eq!(run.selected, Some(3));
        run.select_next(&q);
        assert_eq!(run.selected, Some(0));
        run.select_next(&q);
        assert_eq!(run.selected, Some(1));
    }

    #[test]
    fn advance_requires_answer() {
        let mut run = QuizRun::new();
        run.advance(5);
        assert_eq!(run.current, 0);
    }

    #[test]
    fn advance_past_last_shows_results() {
        let q = fixtures::question(1, "B");
        let mut run = QuizRun::new();
        run.select(1, &q);
        run.confirm(&q);
        run.advance(1);
        assert!(run.show_results);
        assert_eq!(run.current, 0);
        assert_eq!(run.selected, None);
        assert!(!run.answered);
    }

    #[test]
    fn percentage_examples() {
        let run = QuizRun { score: 3, ..Default::default() };
        assert_eq!(run.percentage(5), 60);
        let run = QuizRun { score: 1, ..Default::default() };
        assert_eq!(run.percentage(3), 33);
        let run = QuizRun { score: 2, ..Default::default() };
        assert_eq!(run.percentage(3), 67);
        assert_eq!(QuizRun::default().percentage(0), 0);
    }

    #[test]
    fn five_question_scenario() {
        let data = fixtures::study_data(3, 5);
        let mut run = QuizRun::new();
        let correct_on = [true, false, true, false, true];

        for (question, &answer_right) in data.quiz.iter().zip(&correct_on) {
            let pick = if answer_right { 1 } else { 2 };
            run.select(pick, question);
            run.confirm(question);
            run.advance(data.quiz.len());
        }

        assert!(run.show_results);
        assert_eq!(run.score, 3);
        assert_eq!(run.percentage(data.quiz.len()), 60);
        assert_eq!(run.outcomes, correct_on.to_vec());
    }

    #[test]
    fn restart_resets_everything_but_not_questions() {
        let data = fixtures::study_data(1, 2);
        let snapshot = data.clone();
        let mut run = QuizRun::new();
        for q in &data.quiz {
            run.select(1, q);
            run.confirm(q);
            run.advance(data.quiz.len());
        }
        assert!(run.show_results);

        run.restart();
        assert_eq!(run, QuizRun::default());
        assert_eq!(data, snapshot);
    }

    proptest! {
        #[test]
        fn percentage_matches_rounded_ratio(total in 1usize..200, score_seed in 0usize..200) {
            let score = score_seed % (total + 1);
            let run = QuizRun { score, ..Default::default() };
            let expected = (100.0 * score as f64 / total as f64).round() as u32;
            prop_assert_eq!(run.percentage(total), expected);
        }
    }
}
