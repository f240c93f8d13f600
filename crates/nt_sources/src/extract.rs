//! Pulls a JSON array out of free-form model output.

use nt_core::{RawRecord, StrategyError};

pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```JSON", "").replace("```", "")
}

/// Fence-stripped text between the first `[` and the last `]`, parsed as an array.
pub fn extract_json_array(text: &str) -> Result<Vec<RawRecord>, StrategyError> {
    let cleaned = strip_code_fences(text);
    let (start, end) = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return Err(StrategyError::NoJsonArray),
    };
    serde_json::from_str::<Vec<RawRecord>>(&cleaned[start..=end])
        .map_err(|e| StrategyError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_array() {
        let text = "Here you go:\n```json\n[{\"title\": \"A\"}, {\"title\": \"B\"}]\n```\nEnjoy.";
        let records = extract_json_array(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["title"], "B");
    }

    #[test]
    fn test_no_brackets() {
        assert_eq!(
            extract_json_array("I could not find any news today."),
            Err(StrategyError::NoJsonArray)
        );
        assert_eq!(extract_json_array("] before ["), Err(StrategyError::NoJsonArray));
        assert_eq!(extract_json_array(""), Err(StrategyError::NoJsonArray));
    }

    #[test]
    fn test_invalid_json_between_brackets() {
        let err = extract_json_array("[{\"title\": \"unterminated}]").unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_nested_arrays_use_outermost_brackets() {
        let records = extract_json_array("prefix [{\"tags\": [\"a\", \"b\"]}] [1] suffix");
        // first '[' to last ']' spans two arrays with text between them
        assert_eq!(records.unwrap_err().kind(), "parse");

        let records = extract_json_array("[{\"tags\": [\"a\", \"b\"]}]").unwrap();
        assert_eq!(records[0]["tags"][1], "b");
    }
}
