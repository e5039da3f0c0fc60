//! Curriculum model produced by content generation
//!
//! Field names follow the JSON the model is asked to return (camelCase on the
//! wire), so a response body deserializes straight into [`StudyData`].

use serde::{Deserialize, Serialize};

/// The complete generated curriculum for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyData {
    /// Subject of the learning path
    pub topic: String,
    /// The overall goal the lessons build towards
    pub learning_path_goal: String,
    /// Lessons in presentation order
    pub lessons: Vec<Lesson>,
    /// Quiz questions in presentation order
    pub quiz: Vec<Question>,
}

impl StudyData {
    /// Parse study data from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Number of lessons
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Number of quiz questions
    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }
}

/// A single lesson in the walkthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: String,
    /// Explanatory prose, paragraphs separated by newlines
    pub content: String,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Deep-dive notes
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub insights: Vec<Insight>,
}

impl Lesson {
    /// Non-blank paragraphs of the lesson content
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n').map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Kind of insight callout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Tip,
    Warning,
    Fact,
}

impl InsightKind {
    /// Short label shown next to the callout
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tip => "Tip",
            Self::Warning => "Warning",
            Self::Fact => "Did you know?",
        }
    }
}

/// A short contextual callout attached to a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// A multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier, expected but not guaranteed to be unique within a quiz
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    /// Must equal one of `options` by value
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl Question {
    /// Index of the first option equal to the correct answer
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }

    /// Whether the option at `index` is the correct answer
    pub fn is_correct(&self, index: usize) -> bool {
        self.options.get(index).is_some_and(|o| *o == self.correct_answer)
    }

    /// Whether the question can be scored at all; the option count is not checked
    pub fn is_well_formed(&self) -> bool {
        self.correct_index().is_some()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn lesson(title: &str) -> Lesson {
        Lesson {
            title: title.to_string(),
            content: format!("{title} first paragraph.\n\n{title} second paragraph."),
            summary: format!("Summary of {title}"),
            key_points: vec!["Point one".into(), "Point two".into()],
            notes: vec!["A deeper note".into()],
            insights: vec![
                Insight { kind: InsightKind::Tip, text: "Try it yourself".into() },
                Insight { kind: InsightKind::Warning, text: "Common pitfall".into() },
            ],
        }
    }

    pub fn question(id: i64, correct: &str) -> Question {
        Question {
            id,
            question: format!("Question {id}?"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.to_string(),
            explanation: format!("Because {correct}"),
            difficulty: Difficulty::Medium,
        }
    }

    pub fn study_data(lessons: usize, questions: usize) -> StudyData {
        StudyData {
            topic: "Rust ownership".into(),
            learning_path_goal: "Understand borrowing".into(),
            lessons: (1..=lessons).map(|i| lesson(&format!("Lesson {i}"))).collect(),
            quiz: (1..=questions as i64).map(|i| question(i, "B")).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "topic": "Photosynthesis",
        "learningPathGoal": "Explain how plants make food",
        "lessons": [{
            "title": "Light reactions",
            "content": "Light hits chlorophyll.\n\nWater is split.",
            "summary": "Light becomes chemical energy",
            "keyPoints": ["Chlorophyll absorbs light"],
            "notes": ["Happens in thylakoids"],
            "insights": [{"type": "fact", "text": "Oxygen is a by-product"}]
        }],
        "quiz": [{
            "id": 1,
            "question": "Where do light reactions happen?",
            "options": ["Stroma", "Thylakoid"],
            "correctAnswer": "Thylakoid",
            "explanation": "The thylakoid membrane holds the pigments",
            "difficulty": "easy"
        }]
    }"#;

    #[test]
    fn deserializes_wire_format() {
        let data = StudyData::from_json(SAMPLE).unwrap();
        assert_eq!(data.learning_path_goal, "Explain how plants make food");
        assert_eq!(data.lessons[0].key_points, vec!["Chlorophyll absorbs light".to_string()]);
        assert_eq!(data.lessons[0].insights[0].kind, InsightKind::Fact);
        assert_eq!(data.quiz[0].correct_answer, "Thylakoid");
        assert_eq!(data.quiz[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let data = StudyData::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("learningPathGoal"));
        assert!(json.contains("keyPoints"));
        assert!(json.contains("correctAnswer"));
        assert!(json.contains(r#""type":"fact""#));
    }

    #[test]
    fn missing_lesson_arrays_default_to_empty() {
        let json = r#"{"title":"T","content":"C","summary":"S"}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert!(lesson.key_points.is_empty());
        assert!(lesson.notes.is_empty());
        assert!(lesson.insights.is_empty());
    }

    #[test]
    fn unknown_insight_kind_is_rejected() {
        let json = r#"{"type":"rumour","text":"x"}"#;
        assert!(serde_json::from_str::<Insight>(json).is_err());
    }

    #[test]
    fn paragraphs_skip_blank_lines() {
        let lesson = fixtures::lesson("Intro");
        let paragraphs: Vec<&str> = lesson.paragraphs().collect();
        assert_eq!(paragraphs, vec!["Intro first paragraph.", "Intro second paragraph."]);
    }

    #[test]
    fn correct_index_matches_by_value() {
        let q = fixtures::question(1, "C");
        assert_eq!(q.correct_index(), Some(2));
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
        assert!(!q.is_correct(10));
    }

    #[test]
    fn question_without_matching_answer_is_malformed() {
        let q = fixtures::question(1, "Z");
        assert_eq!(q.correct_index(), None);
        assert!(!q.is_well_formed());
    }

    #[test]
    fn single_option_question_is_scorable() {
        let mut q = fixtures::question(1, "A");
        q.options.truncate(1);
        assert_eq!(q.correct_index(), Some(0));
        assert!(q.is_well_formed());
    }
}
