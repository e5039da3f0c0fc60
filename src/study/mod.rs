//! Generated curriculum: the data model and how it is produced

pub mod generator;
pub mod model;
pub mod prompt;

pub use generator::{GenerationError, StudyGenerator, parse_study_data};
pub use model::{Difficulty, Insight, InsightKind, Lesson, Question, StudyData};
