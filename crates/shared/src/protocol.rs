use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of `result` the spreadsheet script reports for an accepted row.
pub const SUCCESS_MARKER: &str = "success";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl SubmitResponse {
    pub fn success() -> Self {
        Self {
            result: Some(SUCCESS_MARKER.to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<Value>) -> Self {
        Self {
            result: Some("error".to_string()),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.as_deref() == Some(SUCCESS_MARKER)
    }

    /// Best-effort description of why the endpoint refused the row.
    pub fn failure_detail(&self) -> String {
        match (&self.error, &self.result) {
            (Some(Value::String(message)), _) => message.clone(),
            (Some(other), _) => other.to_string(),
            (None, Some(result)) => format!("unexpected result '{result}'"),
            (None, None) => "response carried neither result nor error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_marker() {
        let response: SubmitResponse =
            serde_json::from_str(r#"{"result":"success","row":12}"#).expect("parse");
        assert!(response.is_success());
    }

    #[test]
    fn error_object_is_reported_verbatim() {
        let response: SubmitResponse =
            serde_json::from_str(r#"{"result":"error","error":{"name":"Exception"}}"#)
                .expect("parse");
        assert!(!response.is_success());
        assert_eq!(response.failure_detail(), r#"{"name":"Exception"}"#);
    }

    #[test]
    fn empty_object_is_not_success() {
        let response: SubmitResponse = serde_json::from_str("{}").expect("parse");
        assert!(!response.is_success());
        assert_eq!(
            response.failure_detail(),
            "response carried neither result nor error"
        );
    }
}
