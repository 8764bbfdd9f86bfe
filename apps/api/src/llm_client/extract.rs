//! Locates the JSON object embedded in a free-text model reply.
//!
//! The span runs from the leftmost `{` to the rightmost `}` after it (greedy),
//! or to the end of the reply when no closing brace follows. A reply with no `{`
//! at all is `Absent`; a span that does not parse is `Malformed`. Callers treat
//! the two differently, so they must stay distinct.

use serde_json::Value;

#[derive(Debug)]
pub enum Extraction {
    Found(Value),
    Absent,
    Malformed(serde_json::Error),
}

pub fn extract_json_object(reply: &str) -> Extraction {
    let Some(start) = reply.find('{') else {
        return Extraction::Absent;
    };
    let end = match reply.rfind('}') {
        Some(end) if end > start => end + 1,
        _ => reply.len(),
    };

    match serde_json::from_str::<Value>(&reply[start..end]) {
        Ok(value) => Extraction::Found(value),
        Err(e) => Extraction::Malformed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn found(reply: &str) -> Value {
        match extract_json_object(reply) {
            Extraction::Found(v) => v,
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_extracts_object_surrounded_by_prose() {
        let reply = "Here is the result: {\"overallScore\":80} thanks";
        assert_eq!(found(reply), json!({ "overallScore": 80 }));
    }

    #[test]
    fn test_span_is_greedy_across_nested_objects() {
        let reply = "Sure!\n```json\n{\"criteriaScores\": {\"activity\": 7}, \"summary\": \"ok\"}\n```\nDone.";
        assert_eq!(
            found(reply),
            json!({ "criteriaScores": { "activity": 7 }, "summary": "ok" })
        );
    }

    #[test]
    fn test_no_braces_is_absent() {
        assert!(matches!(
            extract_json_object("I cannot review this profile."),
            Extraction::Absent
        ));
        assert!(matches!(extract_json_object(""), Extraction::Absent));
    }

    #[test]
    fn test_unterminated_object_is_malformed() {
        assert!(matches!(
            extract_json_object("{bad json"),
            Extraction::Malformed(_)
        ));
    }

    #[test]
    fn test_invalid_span_is_malformed() {
        assert!(matches!(
            extract_json_object("{\"overallScore\": 80,} and {\"extra\": 1}"),
            Extraction::Malformed(_)
        ));
    }

    #[test]
    fn test_closing_brace_before_opening_is_malformed() {
        assert!(matches!(
            extract_json_object("} then {"),
            Extraction::Malformed(_)
        ));
    }
}
