//! Extraction of document text from point payloads.

use std::collections::HashMap;

use qdrant_client::qdrant::Value;
use qdrant_client::qdrant::value::Kind;

/// Returns the text stored under `key`, if the payload carries a scalar there.
///
/// Numbers and booleans are rendered with their display form; lists, structs
/// and nulls yield `None`.
pub(crate) fn payload_text(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    match payload.get(key)?.kind.as_ref()? {
        Kind::StringValue(text) => Some(text.clone()),
        Kind::IntegerValue(i) => Some(i.to_string()),
        Kind::DoubleValue(f) => Some(f.to_string()),
        Kind::BoolValue(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use qdrant_client::qdrant::ListValue;

    use super::*;

    fn value(kind: Kind) -> Value {
        Value { kind: Some(kind) }
    }

    #[test]
    fn extracts_string_payload() {
        let payload = HashMap::from([(
            "document".to_string(),
            value(Kind::StringValue("Paris is the capital of France.".into())),
        )]);

        assert_eq!(
            payload_text(&payload, "document").as_deref(),
            Some("Paris is the capital of France.")
        );
        assert_eq!(payload_text(&payload, "text"), None);
    }

    #[test]
    fn renders_scalars_and_skips_composites() {
        let payload = HashMap::from([
            ("n".to_string(), value(Kind::IntegerValue(7))),
            ("flag".to_string(), value(Kind::BoolValue(true))),
            (
                "list".to_string(),
                value(Kind::ListValue(ListValue { values: Vec::new() })),
            ),
            ("empty".to_string(), Value { kind: None }),
        ]);

        assert_eq!(payload_text(&payload, "n").as_deref(), Some("7"));
        assert_eq!(payload_text(&payload, "flag").as_deref(), Some("true"));
        assert_eq!(payload_text(&payload, "list"), None);
        assert_eq!(payload_text(&payload, "empty"), None);
    }
}
