//! `split` subcommand: break a top-level JSON array into numbered files.

use std::path::Path;

use serde_json::Value;

use crate::shared::require_input;

/// Run the split subcommand.
///
/// Parses the input as JSON, requires the root value to be an array, and
/// writes each element to `<NN>.json` (1-based, two-digit zero-padded)
/// under the output directory as pretty-printed JSON. Nothing is created
/// on disk until the root has validated.
pub fn run(file: &Path, output_dir: &Path) -> Result<(), i32> {
    require_input(file)?;

    let data = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;

    let root: Value = serde_json::from_str(&data).map_err(|e| {
        eprintln!("Error: invalid JSON in {}: {e}", file.display());
        1
    })?;

    let Value::Array(elements) = root else {
        eprintln!("Error: expected a top-level JSON array, got {}", type_name(&root));
        return Err(1);
    };

    std::fs::create_dir_all(output_dir).map_err(|e| {
        eprintln!("Error: failed to create {}: {e}", output_dir.display());
        1
    })?;

    let count = elements.len();
    for (index, element) in elements.iter().enumerate() {
        let file_name = format!("{:02}.json", index + 1);
        let path = output_dir.join(&file_name);

        let pretty = serde_json::to_string_pretty(element).map_err(|e| {
            eprintln!("Error: failed to serialize element {}: {e}", index + 1);
            1
        })?;
        std::fs::write(&path, pretty).map_err(|e| {
            eprintln!("Error: failed to write {}: {e}", path.display());
            1
        })?;

        println!("Wrote {file_name} ({})", element_name(element));
    }

    let abs_dir = output_dir
        .canonicalize()
        .unwrap_or_else(|_| output_dir.to_path_buf());
    println!("{count} files written to {}", abs_dir.display());
    Ok(())
}

/// The element's `"name"` field, used for the per-file log line.
fn element_name(element: &Value) -> &str {
    element
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("no name")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
