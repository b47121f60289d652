use axum::Json;
use serde::Serialize;
use tracing::instrument;

#[instrument]
pub(crate) async fn status_endpoint() -> Json<StatusResult> {
    tracing::debug!("Request to get status");
    Json(StatusResult::new())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusResult {
    app_name: String,
    version: String,
    state: String,
}

impl StatusResult {
    fn new() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            state: "STARTED".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_serialization() -> eyre::Result<()> {
        let actual_status_json = serde_json::to_string_pretty(&StatusResult::new())?;
        let expected_status_json = format!(
            r#"{{
  "appName": "translator_service",
  "version": "{}",
  "state": "STARTED"
}}"#,
            env!("CARGO_PKG_VERSION")
        );

        assert_eq!(actual_status_json, expected_status_json);

        Ok(())
    }
}
