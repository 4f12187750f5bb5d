//! JSON export and import of bracket snapshots.
//!
//! Export is a read-only projection of an engine's state. Import only
//! decodes; pass the result to [`BracketEngine::restore`] to validate it and
//! rebuild an engine.
//!
//! [`BracketEngine::restore`]: crate::bracket::BracketEngine::restore

use crate::bracket::{BracketResult, BracketSnapshot};

/// Compact JSON
pub fn to_json(snapshot: &BracketSnapshot) -> BracketResult<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Indented JSON, for files meant to be read by people
pub fn to_json_pretty(snapshot: &BracketSnapshot) -> BracketResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Decode a snapshot previously produced by [`to_json`] or [`to_json_pretty`]
pub fn from_json(json: &str) -> BracketResult<BracketSnapshot> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{BracketConfig, BracketEngine, BracketError, ErrorKind, IdentityShuffler};

    #[test]
    fn test_export_shape() {
        let mut engine =
            BracketEngine::with_shuffler(BracketConfig::default(), IdentityShuffler).unwrap();
        engine.add_participant("Ada").unwrap();
        engine.add_participant("Grace").unwrap();
        engine.initialize_bracket().unwrap();

        let json = to_json(&engine.snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["is_started"], true);
        assert_eq!(value["participants"][0]["name"], "Ada");
        assert_eq!(value["participants"][1]["seed"], 2);
        assert_eq!(value["matches"][0]["round"], 1);
        assert_eq!(value["matches"][0]["position"], 0);
        assert_eq!(value["matches"][0]["participant2"]["name"], "Grace");
        assert!(value["matches"][0]["winner"].is_null());
    }

    #[test]
    fn test_import_exported_state() {
        let mut engine =
            BracketEngine::with_shuffler(BracketConfig::default(), IdentityShuffler).unwrap();
        for name in ["a", "b", "c"] {
            engine.add_participant(name).unwrap();
        }
        engine.initialize_bracket().unwrap();

        let snapshot = engine.snapshot();
        let decoded = from_json(&to_json_pretty(&snapshot).unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_import_garbage() {
        let err = from_json("{\"participants\": 7}").unwrap_err();
        assert!(matches!(err, BracketError::Serialization(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
