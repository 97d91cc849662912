//! Offline conversion of a members JSON file into a Rust source module.
//!
//! The emitted module exports the dataset under a named binding so it can
//! serve as a static fallback data source. Produced by the `roster-bake`
//! binary; never touched by the runtime loader.

use anyhow::Context;
use serde_json::Value;

/// Name of the binding the generated module exports.
pub const EXPORT_BINDING: &str = "MEMBERS_JSON";

/// Render a JSON array of member records as Rust source.
pub fn bake_module(json: &str) -> anyhow::Result<String> {
    let payload: Value = serde_json::from_str(json).context("input is not valid JSON")?;
    if !payload.is_array() {
        anyhow::bail!("expected a JSON array of member records");
    }

    let rendered = serde_json::to_string_pretty(&payload)?;
    let hashes = "#".repeat(raw_hash_count(&rendered));
    Ok(format!(
        "// Generated by roster-bake — do not edit by hand.\n\n\
         pub static {EXPORT_BINDING}: &str = r{hashes}\"{rendered}\"{hashes};\n",
    ))
}

/// Enough `#`s to terminate the raw string safely: one more than the
/// longest `"#…` run in the payload.
fn raw_hash_count(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut after_quote = false;
    for c in text.chars() {
        match c {
            '"' => {
                after_quote = true;
                run = 0;
            }
            '#' if after_quote => {
                run += 1;
                longest = longest.max(run);
            }
            _ => after_quote = false,
        }
    }
    longest + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bakes_an_array_into_a_module() {
        let module = bake_module(r#"[{"name": "Zoe"}]"#).unwrap();
        assert!(module.contains("pub static MEMBERS_JSON: &str ="));
        assert!(module.contains("\"name\": \"Zoe\""));
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(bake_module(r#"{"name": "Zoe"}"#).is_err());
        assert!(bake_module("not json").is_err());
    }

    #[test]
    fn hash_count_exceeds_payload_runs() {
        // A value containing `"##` must not terminate the raw string early,
        // so the delimiter grows to three hashes.
        let module = bake_module(r###"[{"note": "quote\"## inside"}]"###).unwrap();
        assert!(module.contains("r###\""));
        assert!(module.trim_end().ends_with("\"###;"));
    }

    #[test]
    fn baked_payload_round_trips() {
        let module = bake_module(r#"[{"name": "Amir"}, {"name": "Zoe"}]"#).unwrap();
        let start = module.find('[').unwrap();
        let end = module.rfind(']').unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&module[start..=end]).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn module_file_is_written_and_parses_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("members_data.rs");
        let module = bake_module(r#"[{"name": "Zoe"}]"#).unwrap();
        std::fs::write(&out, &module).unwrap();
        let read_back = std::fs::read_to_string(&out).unwrap();
        assert_eq!(read_back, module);
        assert!(read_back.starts_with("// Generated by roster-bake"));
    }
}
