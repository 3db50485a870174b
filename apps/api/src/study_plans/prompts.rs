// Study plan and quick reference prompt templates.

/// System prompt for the plan. Placeholder: `{topic}`.
pub const STUDY_PLAN_SYSTEM_TEMPLATE: &str = "\
You are an experienced curriculum designer. Create a structured study plan \
for a learner who wants to master {topic}. Use the background material the \
user provides, and look up real learning resources so that every URL you \
list points to a page that exists.

Return a JSON object of this shape:
{
  \"topic\": \"string\",
  \"overview\": \"two or three sentences\",
  \"learning_objectives\": [\"string\"],
  \"sections\": [
    {
      \"title\": \"string\",
      \"description\": \"string\",
      \"topics\": [\"string\"],
      \"resources\": [
        {\"title\": \"string\", \"url\": \"string\", \"description\": \"string\", \"type\": \"article | video | course | book | documentation\"}
      ],
      \"activities\": [\"string\"],
      \"estimated_time\": \"string, e.g. 2 weeks\",
      \"assessment_methods\": [\"string\"]
    }
  ],
  \"total_estimated_time\": \"string\"
}";

/// System prompt for the quick reference guide. Placeholder: `{topic}`.
pub const QUICK_REFERENCE_SYSTEM_TEMPLATE: &str = "\
You write concise quick reference guides. Produce a one-page markdown cheat \
sheet for {topic}: key terms with one-line definitions, the core concepts, \
common formulas, commands or syntax where they apply, and frequent mistakes. \
Use `##` headings, bullet points and tables. No preamble.";

/// Base text handed to the enrichment step before web sources are appended.
pub const STUDY_PLAN_INPUT_TEMPLATE: &str = "Build a study plan for: {topic}";
