// Study plans: topic → researched plan plus an optional quick reference.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;

use serde::{Deserialize, Serialize};

/// A study plan as produced by the model. Missing fields default to empty
/// so a partially filled plan still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyPlanData {
    pub topic: String,
    pub overview: String,
    pub learning_objectives: Vec<String>,
    pub sections: Vec<StudyPlanSection>,
    pub total_estimated_time: String,
    /// Set when generation failed and the plan is a placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyPlanSection {
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
    pub resources: Vec<StudyPlanResource>,
    pub activities: Vec<String>,
    pub estimated_time: String,
    pub assessment_methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyPlanResource {
    pub title: String,
    pub url: String,
    pub description: String,
    /// article, video, course, book, documentation, ...
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl StudyPlanData {
    /// Placeholder returned in place of a plan when generation fails.
    pub fn degraded(topic: &str, error: impl ToString) -> Self {
        Self {
            topic: topic.to_string(),
            overview: format!("A study plan for {topic} could not be generated."),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_plan_parses_with_defaults() {
        let plan: StudyPlanData = serde_json::from_value(json!({
            "overview": "Learn Rust ownership.",
            "sections": [{
                "title": "Borrowing",
                "resources": [{"title": "The Book", "url": "https://doc.rust-lang.org/book/", "type": "book"}]
            }]
        }))
        .unwrap();

        assert_eq!(plan.overview, "Learn Rust ownership.");
        assert!(plan.learning_objectives.is_empty());
        assert_eq!(plan.sections[0].resources[0].resource_type, "book");
        assert!(plan.sections[0].activities.is_empty());
        assert_eq!(plan.error, None);
    }

    #[test]
    fn test_degraded_plan_serializes_error_and_empty_lists() {
        let value =
            serde_json::to_value(StudyPlanData::degraded("Rust", "model call failed")).unwrap();
        assert_eq!(value["topic"], "Rust");
        assert_eq!(value["error"], "model call failed");
        assert_eq!(value["sections"], json!([]));
        assert_eq!(value["learning_objectives"], json!([]));
    }

    #[test]
    fn test_error_is_omitted_when_absent() {
        let value = serde_json::to_value(StudyPlanData::default()).unwrap();
        assert!(value.get("error").is_none());
    }
}
