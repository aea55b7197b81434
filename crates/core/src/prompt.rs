//! Prompt text sent to the language model for each quiz question.

/// Topic used when the user leaves the topic field blank.
pub const DEFAULT_TOPIC: &str = "General Knowledge";

/// Quiz question prompt. `{topic}` and `{context}` are the only placeholders;
/// every other brace is literal JSON.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"
You are a subject matter expert on the topic: {topic}

Follow the instructions to create a quiz question:
1. Generate a question based on the topic provided and context as key "question"
2. Provide 4 multiple choice answers to the question as a list of key-value pairs "choices"
3. Provide the correct answer for the question from the list of answers as key "answer"
4. Provide an explanation as to why the answer is correct as key "explanation"

You must respond as a JSON object with the following structure:
{
    "question": "<question>",
    "choices": [
        {"key": "A", "value": "<choice>"},
        {"key": "B", "value": "<choice>"},
        {"key": "C", "value": "<choice>"},
        {"key": "D", "value": "<choice>"}
    ],
    "answer": "<answer key from choices list>",
    "explanation": "<explanation as to why the answer is correct>"
}

Context: {context}
"#;

const TOPIC_SLOT: &str = "{topic}";
const CONTEXT_SLOT: &str = "{context}";

/// Resolve the topic shown to the model, falling back to `DEFAULT_TOPIC`.
#[must_use]
pub fn effective_topic(topic: &str) -> &str {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        DEFAULT_TOPIC
    } else {
        trimmed
    }
}

/// Fill the template in a single pass, so placeholder-looking text inside
/// `topic` or `context` is never expanded again.
#[must_use]
pub fn render_quiz_prompt(topic: &str, context: &str) -> String {
    let mut out = String::with_capacity(QUIZ_PROMPT_TEMPLATE.len() + topic.len() + context.len());
    let mut rest = QUIZ_PROMPT_TEMPLATE;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix(TOPIC_SLOT) {
            out.push_str(topic);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(CONTEXT_SLOT) {
            out.push_str(context);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Join retrieved snippets into the `{context}` block.
#[must_use]
pub fn join_context<S: AsRef<str>>(snippets: &[S]) -> String {
    snippets
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n\n")
}
