// Question generation prompt templates.

/// System prompt. Placeholders: `{num_questions}`, `{difficulty}`.
pub const QUESTION_SYSTEM_TEMPLATE: &str = "\
You are a teacher tasked with creating {num_questions} multiple-choice questions \
on the study material the user provides. \
Each question must have exactly four options (a, b, c, d) and one correct answer. \
Make sure the difficulty of each question is {difficulty}.

Return a JSON array with exactly {num_questions} objects of this shape:
[
  {
    \"question\": \"string\",
    \"option_a\": \"string\",
    \"option_b\": \"string\",
    \"option_c\": \"string\",
    \"option_d\": \"string\",
    \"answer\": \"the text of the correct option\"
  }
]";

/// Prefix for the user message that carries the extracted document.
pub const QUESTION_INPUT_PREFIX: &str = "Study material:\n\n";
