// sandtable/src/commands/validate.rs
//
// USE CASE: validate a request payload before it is sent to the backend.

use std::path::PathBuf;

use sandtable_core::application::{validate_document, validate_request_file};

pub fn execute(operation: &str, input: Option<PathBuf>, data: Option<String>) -> anyhow::Result<()> {
    let result = match (input, data) {
        (Some(path), _) => validate_request_file(&path, operation)?,
        (None, Some(json)) => validate_document(operation, &json)?,
        (None, None) => anyhow::bail!("Provide a request with --input <file> or --data <json>"),
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_valid() {
        eprintln!("\n❌ {} validation error(s):", result.errors().len());
        for err in result.errors() {
            eprintln!("   ➜ {}", err);
        }
        // Exit with error code for CI/CD
        std::process::exit(1);
    }

    eprintln!("\n✅ '{}' request is valid", operation);
    Ok(())
}
