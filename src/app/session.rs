//! Study session controller
//!
//! Owns the active phase and the loaded curriculum. Views read it; only the
//! transition methods below change it.

use std::fmt;

use thiserror::Error;

use super::quiz::QuizRun;
use super::walkthrough::Walkthrough;
use crate::study::{Question, StudyData};

/// The single active mode of the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Landing,
    Processing,
    Studying,
    Testing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Landing => "landing",
            Phase::Processing => "processing",
            Phase::Studying => "studying",
            Phase::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Rejected phase transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot handle '{event}' while {phase}")]
    InvalidTransition { phase: Phase, event: &'static str },
}

/// Session state container
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    study: Option<StudyData>,
    /// Lesson position, meaningful while studying
    pub walkthrough: Walkthrough,
    /// Quiz progress, meaningful while testing
    pub quiz: QuizRun,
    /// Banner message from the last failed generation
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn study(&self) -> Option<&StudyData> {
        self.study.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The question under the quiz cursor, the quiz state and the question count
    pub fn current_question(&mut self) -> Option<(&Question, &mut QuizRun, usize)> {
        let questions = &self.study.as_ref()?.quiz;
        let question = questions.get(self.quiz.current)?;
        Some((question, &mut self.quiz, questions.len()))
    }

    fn expect_phase(&self, allowed: &[Phase], event: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            tracing::warn!("Ignoring '{}' while {}", event, self.phase);
            Err(SessionError::InvalidTransition { phase: self.phase, event })
        }
    }

    /// Text was extracted; generation is about to start
    pub fn content_extracted(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Landing], "content extracted")?;
        self.error = None;
        self.phase = Phase::Processing;
        Ok(())
    }

    /// Generation produced a curriculum
    pub fn generation_succeeded(&mut self, data: StudyData) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Processing], "generation succeeded")?;
        self.walkthrough = Walkthrough::new(data.lessons.len());
        self.quiz = QuizRun::new();
        self.study = Some(data);
        self.phase = Phase::Studying;
        Ok(())
    }

    /// Generation failed (or was cancelled); back to landing with a banner
    pub fn generation_failed(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Processing], "generation failed")?;
        self.error = Some(message.into());
        self.phase = Phase::Landing;
        Ok(())
    }

    /// The last lesson was passed; start the quiz
    pub fn walkthrough_finished(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Studying], "walkthrough finished")?;
        self.quiz = QuizRun::new();
        self.phase = Phase::Testing;
        Ok(())
    }

    /// Go back to the lessons with a fresh quiz run
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Testing], "restart")?;
        self.quiz.restart();
        self.walkthrough = Walkthrough::new(self.walkthrough.total());
        self.phase = Phase::Studying;
        Ok(())
    }

    /// Leave the session and drop the curriculum
    pub fn exit(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Studying, Phase::Testing], "exit")?;
        self.study = None;
        self.walkthrough = Walkthrough::default();
        self.quiz = QuizRun::new();
        self.phase = Phase::Landing;
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::model::fixtures;
    use pretty_assertions::assert_eq;

    fn studying(lessons: usize, questions: usize) -> Session {
        let mut session = Session::new();
        session.content_extracted().unwrap();
        session.generation_succeeded(fixtures::study_data(lessons, questions)).unwrap();
        session
    }

    #[test]
    fn starts_on_landing() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Landing);
        assert!(session.study().is_none());
    }

    #[test]
    fn happy_path_reaches_testing() {
        let mut session = studying(3, 5);
        assert_eq!(session.phase(), Phase::Studying);
        assert_eq!(session.walkthrough.total(), 3);

        session.walkthrough_finished().unwrap();
        assert_eq!(session.phase(), Phase::Testing);
    }

    #[test]
    fn failure_returns_to_landing_with_banner() {
        let mut session = Session::new();
        session.content_extracted().unwrap();
        session.generation_failed("No API key").unwrap();

        assert_eq!(session.phase(), Phase::Landing);
        assert_eq!(session.error(), Some("No API key"));
        assert!(session.study().is_none());

        session.dismiss_error();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn new_extraction_clears_old_banner() {
        let mut session = Session::new();
        session.content_extracted().unwrap();
        session.generation_failed("boom").unwrap();
        session.content_extracted().unwrap();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn restart_resets_quiz_and_lessons_but_keeps_data() {
        let mut session = studying(2, 2);
        let original = session.study().cloned();
        session.walkthrough.next();
        session.walkthrough_finished().unwrap();
        session.quiz.score = 2;
        session.quiz.show_results = true;

        session.restart().unwrap();
        assert_eq!(session.phase(), Phase::Studying);
        assert_eq!(session.quiz, QuizRun::default());
        assert_eq!(session.walkthrough.current(), 0);
        assert_eq!(session.study().cloned(), original);
    }

    #[test]
    fn current_question_follows_quiz_cursor() {
        let mut session = studying(1, 3);
        session.walkthrough_finished().unwrap();
        let (question, quiz, total) = session.current_question().unwrap();
        assert_eq!(question.id, 1);
        assert_eq!(total, 3);
        quiz.current = 2;

        let (question, _, _) = session.current_question().unwrap();
        assert_eq!(question.id, 3);

        session.quiz.current = 3;
        assert!(session.current_question().is_none());
    }

    #[test]
    fn current_question_needs_study_data() {
        let mut session = Session::new();
        assert!(session.current_question().is_none());
    }

    #[test]
    fn exit_discards_study_data() {
        let mut session = studying(1, 1);
        session.walkthrough_finished().unwrap();
        session.exit().unwrap();

        assert_eq!(session.phase(), Phase::Landing);
        assert!(session.study().is_none());
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut session = Session::new();
        assert_eq!(
            session.walkthrough_finished(),
            Err(SessionError::InvalidTransition {
                phase: Phase::Landing,
                event: "walkthrough finished"
            })
        );
        assert!(session.exit().is_err());
        assert!(session.restart().is_err());
        assert!(session.generation_succeeded(fixtures::study_data(1, 1)).is_err());
        assert_eq!(session.phase(), Phase::Landing);

        session.content_extracted().unwrap();
        assert!(session.content_extracted().is_err());
        assert!(session.exit().is_err());
        assert_eq!(session.phase(), Phase::Processing);
    }
}
