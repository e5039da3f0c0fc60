//! Response schema constraining the model's JSON output

use serde_json::{Value, json};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

fn lesson_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": string(),
            "content": string(),
            "summary": string(),
            "keyPoints": string_array(),
            "notes": string_array(),
            "insights": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "enum": ["tip", "warning", "fact"] },
                        "text": string()
                    },
                    "required": ["type", "text"]
                }
            }
        },
        "required": ["title", "content", "summary", "keyPoints", "notes", "insights"]
    })
}

fn question_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "INTEGER" },
            "question": string(),
            "options": string_array(),
            "correctAnswer": string(),
            "explanation": string(),
            "difficulty": { "type": "STRING", "enum": ["easy", "medium", "hard"] }
        },
        "required": ["id", "question", "options", "correctAnswer", "explanation", "difficulty"]
    })
}

/// Schema for a complete study curriculum
pub fn study_data_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": string(),
            "learningPathGoal": string(),
            "lessons": { "type": "ARRAY", "items": lesson_schema() },
            "quiz": { "type": "ARRAY", "items": question_schema() }
        },
        "required": ["topic", "learningPathGoal", "lessons", "quiz"]
    })
}
