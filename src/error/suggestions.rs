//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints that
//! name the offending path, config key, or HTTP status.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::InputNotFound => suggest_input_not_found(context),
        ErrorCode::ConfigMissingRequired => suggest_config_missing_required(context),
        ErrorCode::ApiRejected => suggest_api_rejected(context),
        ErrorCode::ImportPrecondition => suggest_import_precondition(context),
        // Fall back to static suggestion for other codes
        _ => code.suggestion().to_string(),
    }
}

fn suggest_input_not_found(context: Option<&Value>) -> String {
    let Some(path) = context.and_then(|c| c.get("path")).and_then(Value::as_str) else {
        return ErrorCode::InputNotFound.suggestion().to_string();
    };

    format!(
        "File '{path}' does not exist. Check the path, or pipe the text in with `qbank check -`"
    )
}

fn suggest_config_missing_required(context: Option<&Value>) -> String {
    let Some(key) = context
        .and_then(|c| c.get("config_key"))
        .and_then(Value::as_str)
    else {
        return ErrorCode::ConfigMissingRequired.suggestion().to_string();
    };

    let env_var = format!("QBANK_{}", key.replace('.', "_").to_uppercase());
    match key.split_once('.') {
        Some((section, field)) => format!(
            "Set `{field}` under `[{section}]` in config.toml, or export {env_var} (missing: {key})"
        ),
        None => format!("Set `{key}` in config.toml, or export {env_var}"),
    }
}

fn suggest_api_rejected(context: Option<&Value>) -> String {
    let status = context
        .and_then(|c| c.get("status"))
        .and_then(Value::as_u64);

    match status {
        Some(404) => "The create-question endpoint was not found. Check api.base_url and api.create_path".to_string(),
        Some(status) if status >= 500 => format!(
            "The question bank API failed with HTTP {status}. Retry later or check the server logs"
        ),
        Some(status) => format!(
            "The question bank API rejected the request with HTTP {status}. Check the folder id, difficulty and mark values"
        ),
        None => ErrorCode::ApiRejected.suggestion().to_string(),
    }
}

fn suggest_import_precondition(context: Option<&Value>) -> String {
    let reason = context
        .and_then(|c| c.get("reason"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    if reason.contains("folder") {
        "Pass --folder <id>, or set import.folder_id / QBANK_IMPORT_FOLDER_ID".to_string()
    } else if reason.contains("question") {
        "The file has no valid questions. Run `qbank check <file>` to see why".to_string()
    } else {
        ErrorCode::ImportPrecondition.suggestion().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_names_path() {
        let ctx = serde_json::json!({ "path": "bank.txt" });
        let suggestion = suggest_for_error(ErrorCode::InputNotFound, Some(&ctx));
        assert!(suggestion.contains("bank.txt"));
    }

    #[test]
    fn missing_config_names_env_var() {
        let ctx = serde_json::json!({ "config_key": "import.folder_id" });
        let suggestion = suggest_for_error(ErrorCode::ConfigMissingRequired, Some(&ctx));
        assert!(suggestion.contains("QBANK_IMPORT_FOLDER_ID"));
        assert!(suggestion.contains("[import]"));
    }

    #[test]
    fn api_rejected_by_status() {
        let ctx = serde_json::json!({ "status": 503 });
        let suggestion = suggest_for_error(ErrorCode::ApiRejected, Some(&ctx));
        assert!(suggestion.contains("503"));

        let ctx = serde_json::json!({ "status": 404 });
        let suggestion = suggest_for_error(ErrorCode::ApiRejected, Some(&ctx));
        assert!(suggestion.contains("create_path"));
    }

    #[test]
    fn precondition_hints() {
        let ctx = serde_json::json!({ "reason": "no target folder selected" });
        assert!(
            suggest_for_error(ErrorCode::ImportPrecondition, Some(&ctx)).contains("--folder")
        );
        let ctx = serde_json::json!({ "reason": "no valid questions to import" });
        assert!(
            suggest_for_error(ErrorCode::ImportPrecondition, Some(&ctx)).contains("qbank check")
        );
    }

    #[test]
    fn fallback_uses_static_suggestion() {
        assert_eq!(
            suggest_for_error(ErrorCode::IoError, None),
            ErrorCode::IoError.suggestion()
        );
    }
}
