//! Instruction sent alongside the extracted document text

/// Default number of document characters included in the prompt
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 18_000;

const INSTRUCTION: &str = "\
You are an expert educator and curriculum designer. Analyse the text extracted \
from the PDF below carefully and build a complete learning journey from it.

Produce:
1. The topic of the journey and one overall learning goal.
2. Three to four well-structured lessons.
3. For each lesson: a title, explanatory content (paragraphs separated by \
newlines), a short summary, key points, deep-dive notes for advanced students, \
and insights, each tagged as a tip, a warning, or a fact.
4. A five-question multiple-choice quiz of mixed difficulty that tests real \
understanding. The correct answer must be copied exactly from one of the options.

Keep the style engaging and educational.";

/// Take at most `max_chars` characters from the start of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Build the full prompt for a document
pub fn build_prompt(text: &str, max_chars: usize, language: &str) -> String {
    format!(
        "{INSTRUCTION}\nWrite everything in {language}.\n\nExtracted text:\n{}",
        truncate_chars(text, max_chars)
    )
}
