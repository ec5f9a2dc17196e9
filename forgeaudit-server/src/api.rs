//! API handlers for the report endpoints
//!
//! The router is a pure function of (method, path, session, body) over
//! the shared application state, so handlers are testable without a
//! running listener. Field updates are infallible on well-formed input;
//! enhancement validation failures map to 400 and export failures to
//! 500, everything else to 200.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use forgeaudit_core::enhance::Enhancer;
use forgeaudit_core::render::export_docx;
use forgeaudit_core::report::{Finding, ReportStore};

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const EXPORT_FILENAME: &str = "Forge_Audit_Report.docx";

/// Shared application state
pub struct AppState {
    pub store: ReportStore,
    pub enhancer: Enhancer,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct AuditNameBody {
    audit_name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ExecutiveSummaryBody {
    executive_summary: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BackgroundBody {
    background: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ScopeBody {
    included: String,
    excluded: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FindingsBody {
    findings: Vec<Finding>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AppendixBody {
    appendix: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct EnhanceBody {
    section: String,
    prompt: String,
    current_content: String,
}

/// Dispatch one request to its handler
pub async fn route(
    state: Arc<AppState>,
    method: &Method,
    path: &str,
    session: &str,
    body: Bytes,
) -> Response<Full<Bytes>> {
    // hyper's Method constants are not patterns, so match on the name.
    match (method.as_str(), path) {
        ("GET", "/api/report") => get_report(state, session).await,
        ("POST", "/api/report/audit-name") => {
            update_field::<AuditNameBody>(state, session, body, "Audit Name updated", |r, b| {
                r.audit_name = b.audit_name;
            })
            .await
        }
        ("POST", "/api/report/executive-summary") => {
            update_field::<ExecutiveSummaryBody>(
                state,
                session,
                body,
                "Executive Summary updated",
                |r, b| r.executive_summary = b.executive_summary,
            )
            .await
        }
        ("POST", "/api/report/background") => {
            update_field::<BackgroundBody>(state, session, body, "Background updated", |r, b| {
                r.background = b.background;
            })
            .await
        }
        ("POST", "/api/report/scope") => {
            update_field::<ScopeBody>(state, session, body, "Scope updated", |r, b| {
                r.scope.included = b.included;
                r.scope.excluded = b.excluded;
            })
            .await
        }
        ("POST", "/api/report/findings") => {
            update_field::<FindingsBody>(state, session, body, "Findings updated", |r, b| {
                r.findings = b.findings;
            })
            .await
        }
        ("POST", "/api/report/appendix") => {
            update_field::<AppendixBody>(state, session, body, "Appendix updated", |r, b| {
                r.appendix = b.appendix;
            })
            .await
        }
        ("POST", "/api/report/enhance") => enhance(state, body).await,
        ("POST", "/api/report/export") => export(state, session).await,
        ("POST", "/api/report/clear") => clear(state, session).await,
        (_, path) if path.starts_with("/api/report") => json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &json!({ "success": false, "error": "Method not allowed" }),
        ),
        _ => json_response(
            StatusCode::NOT_FOUND,
            &json!({ "success": false, "error": "Not found" }),
        ),
    }
}

async fn get_report(state: Arc<AppState>, session: &str) -> Response<Full<Bytes>> {
    let report = state.store.snapshot(session).await;
    let body = serde_json::to_value(&report).unwrap_or_else(|e| {
        error!("Failed to serialize report: {}", e);
        json!({})
    });
    json_response(StatusCode::OK, &body)
}

/// Parse the body as `B`, apply the mutation, and acknowledge.
async fn update_field<B>(
    state: Arc<AppState>,
    session: &str,
    body: Bytes,
    message: &str,
    apply: impl FnOnce(&mut forgeaudit_core::report::Report, B),
) -> Response<Full<Bytes>>
where
    B: for<'de> Deserialize<'de>,
{
    let parsed: B = match serde_json::from_slice(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Malformed update body: {}", e);
            return json_response(
                StatusCode::BAD_REQUEST,
                &json!({ "success": false, "error": format!("Invalid request body: {}", e) }),
            );
        }
    };

    state.store.update(session, |report| apply(report, parsed)).await;
    json_response(StatusCode::OK, &json!({ "success": true, "message": message }))
}

async fn enhance(state: Arc<AppState>, body: Bytes) -> Response<Full<Bytes>> {
    let parsed: EnhanceBody = match serde_json::from_slice(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                &json!({ "success": false, "error": format!("Invalid request body: {}", e) }),
            );
        }
    };

    if parsed.section.trim().is_empty() || parsed.prompt.trim().is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!({ "success": false, "error": "Section and prompt are required" }),
        );
    }

    // The adapter never fails and never touches the stored report; the
    // client applies the result through the field update endpoints.
    let enhanced = state
        .enhancer
        .enhance(&parsed.section, &parsed.prompt, &parsed.current_content)
        .await;

    json_response(
        StatusCode::OK,
        &json!({ "success": true, "enhancedContent": enhanced }),
    )
}

async fn export(state: Arc<AppState>, session: &str) -> Response<Full<Bytes>> {
    let report = state.store.snapshot(session).await;
    match export_docx(&report) {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", DOCX_CONTENT_TYPE)
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            )
            .body(Full::new(Bytes::from(bytes)))
            .unwrap_or_else(|_| empty_error_response()),
        Err(e) => {
            error!("Document export failed: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "success": false, "error": "Failed to generate document" }),
            )
        }
    }
}

async fn clear(state: Arc<AppState>, session: &str) -> Response<Full<Bytes>> {
    state.store.clear(session).await;
    json_response(StatusCode::OK, &json!({ "success": true, "message": "Report cleared" }))
}

/// Build a JSON response with the given status code and body.
pub fn json_response(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    let bytes = serde_json::to_vec(body).unwrap_or_default();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(bytes)))
        .unwrap_or_else(|_| empty_error_response())
}

fn empty_error_response() -> Response<Full<Bytes>> {
    warn!("Failed to build HTTP response, returning empty 500");
    let mut resp = Response::new(Full::new(Bytes::new()));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forgeaudit_core::report::DEFAULT_SESSION;
    use http_body_util::BodyExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: ReportStore::new(),
            enhancer: Enhancer::new(None),
        })
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        path: &str,
        body: &str,
    ) -> Response<Full<Bytes>> {
        route(
            Arc::clone(state),
            &method,
            path,
            DEFAULT_SESSION,
            Bytes::from(body.to_string()),
        )
        .await
    }

    #[tokio::test]
    async fn test_get_report_returns_empty_report() {
        let state = test_state();
        let response = send(&state, Method::GET, "/api/report", "").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["auditName"], "");
        assert_eq!(json["findings"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_field_updates_round_trip() {
        let state = test_state();

        let response = send(
            &state,
            Method::POST,
            "/api/report/audit-name",
            r#"{"auditName":"Vendor Review"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Audit Name updated");

        send(
            &state,
            Method::POST,
            "/api/report/scope",
            r#"{"included":"a\nb","excluded":"c"}"#,
        )
        .await;

        let report = state.store.snapshot(DEFAULT_SESSION).await;
        assert_eq!(report.audit_name, "Vendor Review");
        assert_eq!(report.scope.included, "a\nb");
    }

    #[tokio::test]
    async fn test_replace_findings() {
        let state = test_state();
        let body = r#"{"findings":[{"shortName":"f1","rating":"High","description":"d",
            "recommendations":"r","actionItems":[{"name":"t1","dueDate":"2025-03-05"}]}]}"#;
        let response = send(&state, Method::POST, "/api/report/findings", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let report = state.store.snapshot(DEFAULT_SESSION).await;
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].action_items.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_update_is_rejected() {
        let state = test_state();
        let response = send(&state, Method::POST, "/api/report/audit-name", "not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_enhance_requires_section_and_prompt() {
        let state = test_state();
        let response = send(
            &state,
            Method::POST,
            "/api/report/enhance",
            r#"{"section":"","prompt":"improve"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Section and prompt are required");
    }

    #[tokio::test]
    async fn test_enhance_falls_back_without_provider() {
        let state = test_state();
        let response = send(
            &state,
            Method::POST,
            "/api/report/enhance",
            r#"{"section":"Background","prompt":"improve","currentContent":"ctx"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json["enhancedContent"].as_str().unwrap().starts_with("ctx"));
    }

    #[tokio::test]
    async fn test_export_returns_docx_attachment() {
        let state = test_state();
        let response = send(&state, Method::POST, "/api/report/export", "{}").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            DOCX_CONTENT_TYPE
        );
        assert!(response
            .headers()
            .get("Content-Disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Forge_Audit_Report.docx"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[tokio::test]
    async fn test_clear_resets_report() {
        let state = test_state();
        send(
            &state,
            Method::POST,
            "/api/report/appendix",
            r#"{"appendix":"notes"}"#,
        )
        .await;
        send(&state, Method::POST, "/api/report/clear", "{}").await;

        let report = state.store.snapshot(DEFAULT_SESSION).await;
        assert!(report.appendix.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_and_wrong_method_is_405() {
        let state = test_state();
        let response = send(&state, Method::GET, "/api/unknown", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&state, Method::GET, "/api/report/export", "").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
