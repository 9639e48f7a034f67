//! Wire types for the `/process` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::SynthesisError;
use crate::plan::Plan;
use crate::session::{History, SessionId};

/// Status value for a clarification request
pub const STATUS_CLARIFICATION_NEEDED: &str = "clarification_needed";

/// Status value for a generated plan
pub const STATUS_PLAN_GENERATED: &str = "plan_generated";

/// Body of `POST <base>/process`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRequest {
    pub session_id: SessionId,
    /// The raw user input, exactly as typed
    pub user_input: String,
    /// History including the user turn for this request
    pub history: History,
}

/// A recognized response from the synthesis service
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SynthesisResponse {
    /// The service needs more detail before it can plan
    ClarificationNeeded {
        #[serde(default)]
        analysis: String,
        #[serde(default)]
        questions: Vec<String>,
    },

    /// The service produced a plan
    PlanGenerated { plan: Plan },
}

impl SynthesisResponse {
    /// Classify a raw response body
    ///
    /// Unknown or missing `status` values yield
    /// [`SynthesisError::UnrecognizedStatus`]; a known status with the wrong
    /// shape yields [`SynthesisError::Json`].
    pub fn from_value(value: Value) -> Result<Self, SynthesisError> {
        let status = value.get("status").and_then(Value::as_str).map(String::from);
        debug!(?status, "SynthesisResponse::from_value: called");

        match status.as_deref() {
            Some(STATUS_CLARIFICATION_NEEDED) | Some(STATUS_PLAN_GENERATED) => Ok(serde_json::from_value(value)?),
            _ => Err(SynthesisError::UnrecognizedStatus(status)),
        }
    }

    /// Parse and classify a raw response body
    pub fn from_body(body: &str) -> Result<Self, SynthesisError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Turn;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let history = History::new().append(Turn::user("Build a todo app"));
        let request = ProcessRequest {
            session_id: SessionId::from_string("session_abc"),
            user_input: "Build a todo app".to_string(),
            history,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "session_id": "session_abc",
                "user_input": "Build a todo app",
                "history": [{"role": "user", "content": "Build a todo app"}]
            })
        );
    }

    #[test]
    fn test_parse_clarification() {
        let response = SynthesisResponse::from_value(json!({
            "status": "clarification_needed",
            "analysis": "Need more detail",
            "questions": ["What platform?"]
        }))
        .unwrap();

        assert_eq!(
            response,
            SynthesisResponse::ClarificationNeeded {
                analysis: "Need more detail".to_string(),
                questions: vec!["What platform?".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_clarification_without_questions() {
        let response = SynthesisResponse::from_value(json!({
            "status": "clarification_needed",
            "analysis": "Tell me more"
        }))
        .unwrap();

        assert!(matches!(response, SynthesisResponse::ClarificationNeeded { ref questions, .. } if questions.is_empty()));
    }

    #[test]
    fn test_parse_plan_keeps_key_order() {
        let response = SynthesisResponse::from_body(
            r#"{"status":"plan_generated","plan":{"timeline":"6w","architecture":{"frontend":"React"},"budget":1}}"#,
        )
        .unwrap();

        let SynthesisResponse::PlanGenerated { plan } = response else {
            panic!("expected a plan");
        };
        let keys: Vec<&str> = plan.sections().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["timeline", "architecture", "budget"]);
    }

    #[test]
    fn test_unknown_status_is_unrecognized() {
        let err = SynthesisResponse::from_value(json!({"status": "thinking"})).unwrap_err();
        assert!(matches!(err, SynthesisError::UnrecognizedStatus(Some(ref s)) if s == "thinking"));
    }

    #[test]
    fn test_missing_status_is_unrecognized() {
        let err = SynthesisResponse::from_value(json!({"plan": {}})).unwrap_err();
        assert!(matches!(err, SynthesisError::UnrecognizedStatus(None)));

        let err = SynthesisResponse::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, SynthesisError::UnrecognizedStatus(None)));
    }

    #[test]
    fn test_known_status_with_bad_shape_is_json_error() {
        let err = SynthesisResponse::from_value(json!({"status": "plan_generated", "plan": "not an object"})).unwrap_err();
        assert!(matches!(err, SynthesisError::Json(_)));
        assert!(err.is_unrecognized());

        let err = SynthesisResponse::from_value(json!({"status": "plan_generated"})).unwrap_err();
        assert!(err.is_unrecognized());
    }

    #[test]
    fn test_non_json_body() {
        let err = SynthesisResponse::from_body("<html>502</html>").unwrap_err();
        assert!(matches!(err, SynthesisError::Json(_)));
    }
}
