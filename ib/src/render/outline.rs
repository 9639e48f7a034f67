//! Plan tree renderer

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{humanize, stringify};
use crate::plan::Plan;

/// One top-level rendering unit, derived from a single plan key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Original plan key
    pub key: String,
    /// Humanized key
    pub title: String,
    /// Raw section value
    pub content: Value,
    /// Display blocks for the content
    pub blocks: Vec<Block>,
}

/// A body of text inside a section, labeled when it came from a sub-key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub label: Option<String>,
    pub body: String,
}

/// Render every plan key into a section, in plan order
pub fn render(plan: &Plan) -> Vec<Section> {
    debug!(section_count = plan.len(), "render: called");
    plan.sections()
        .map(|(key, content)| Section {
            key: key.clone(),
            title: humanize(key),
            content: content.clone(),
            blocks: render_blocks(content),
        })
        .collect()
}

/// Objects get one labeled block per sub-key; everything else one unlabeled block
fn render_blocks(content: &Value) -> Vec<Block> {
    match content {
        Value::Object(entries) => entries
            .iter()
            .map(|(sub_key, sub_value)| Block {
                label: Some(humanize(sub_key)),
                body: stringify(sub_value),
            })
            .collect(),
        other => vec![Block {
            label: None,
            body: stringify(other),
        }],
    }
}

/// Format sections as a plain-text outline
pub fn format_outline(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("== {} ==\n", section.title));
        for block in &section.blocks {
            match &block.label {
                Some(label) => {
                    out.push_str(&format!("  {}:\n", label));
                    push_indented(&mut out, &block.body, "    ");
                }
                None => push_indented(&mut out, &block.body, "  "),
            }
        }
    }
    out
}

fn push_indented(out: &mut String, body: &str, indent: &str) {
    for line in body.lines() {
        out.push_str(indent);
        out.push_str(line);
        out.push('\n');
    }
    if body.is_empty() {
        out.push_str(indent);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan(value: Value) -> Plan {
        Plan::from_value(value).unwrap()
    }

    #[test]
    fn test_one_section_per_key_in_order() {
        let plan = plan(json!({
            "projectOverview": "A todo app",
            "tech_stack": ["React", "FastAPI"],
            "architecture": {"frontend": "React"},
            "risks": null
        }));
        let sections = render(&plan);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Project Overview", "Tech stack", "Architecture", "Risks"]);
        let keys: Vec<&str> = sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["projectOverview", "tech_stack", "architecture", "risks"]);
    }

    #[test]
    fn test_object_section_gets_labeled_blocks() {
        let sections = render(&plan(json!({
            "architecture": {"frontend": "React", "backendServices": ["auth", "api"], "database": null}
        })));
        assert_eq!(
            sections[0].blocks,
            vec![
                Block {
                    label: Some("Frontend".to_string()),
                    body: "React".to_string()
                },
                Block {
                    label: Some("Backend Services".to_string()),
                    body: "auth • api".to_string()
                },
                Block {
                    label: Some("Database".to_string()),
                    body: "—".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_scalar_and_list_sections_get_single_block() {
        let sections = render(&plan(json!({"summary": "Ship it", "phases": [1, 2], "budget": 5000})));
        assert_eq!(sections[0].blocks, vec![Block { label: None, body: "Ship it".to_string() }]);
        assert_eq!(sections[1].blocks, vec![Block { label: None, body: "1 • 2".to_string() }]);
        assert_eq!(sections[2].blocks, vec![Block { label: None, body: "5000".to_string() }]);
    }

    #[test]
    fn test_null_section_is_kept() {
        let sections = render(&plan(json!({"risks": null})));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].blocks[0].body, "—");
    }

    #[test]
    fn test_second_level_object_falls_back_to_dump() {
        let sections = render(&plan(json!({"deploy": {"targets": {"prod": "eu-west"}}})));
        let body = &sections[0].blocks[0].body;
        assert!(body.contains("\"prod\": \"eu-west\""));
    }

    #[test]
    fn test_empty_object_section_has_no_blocks() {
        let sections = render(&plan(json!({"extras": {}})));
        assert_eq!(sections.len(), 1);
        assert!(sections[0].blocks.is_empty());
    }

    #[test]
    fn test_empty_plan() {
        assert!(render(&Plan::default()).is_empty());
    }

    #[test]
    fn test_format_outline() {
        let sections = render(&plan(json!({
            "architecture": {"frontend": "React"},
            "timeline": "6 weeks"
        })));
        let text = format_outline(&sections);
        assert_eq!(
            text,
            "== Architecture ==\n  Frontend:\n    React\n\n== Timeline ==\n  6 weeks\n"
        );
    }

    #[test]
    fn test_format_outline_indents_multiline_bodies() {
        let sections = render(&plan(json!({"deploy": {"targets": {"prod": "eu"}}})));
        let text = format_outline(&sections);
        assert!(text.contains("  Targets:\n    {\n      \"prod\": \"eu\"\n    }\n"));
    }
}
