//! Email analysis workflow: model first, heuristic fallback on any failure.
//!
//! Callers always get a structurally valid `AnalysisResult`. Gateway and
//! normalizer failures are logged and recorded in `fallback_note`, never
//! returned.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::composer::compose_email_analysis_prompt;
use crate::analysis::heuristic::analyze_heuristically;
use crate::analysis::models::{AnalysisResult, ColleagueInfo, EmailDirection};
use crate::llm_client::{CompletionGateway, CompletionRequest, LlmError};
use crate::normalizer::{parse_analysis, NormalizeError};

const ANALYSIS_MAX_TOKENS: u32 = 1500;

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAnalysisRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub direction: EmailDirection,
    #[serde(default)]
    pub colleague: Option<ColleagueInfo>,
}

/// Why the model path was abandoned.
#[derive(Debug, Error)]
enum ModelPathError {
    #[error("completion failed: {0}")]
    Gateway(#[from] LlmError),

    #[error("{0}")]
    Normalize(#[from] NormalizeError),
}

pub async fn analyze_email(
    gateway: &dyn CompletionGateway,
    request: &EmailAnalysisRequest,
) -> AnalysisResult {
    match analyze_with_model(gateway, request).await {
        Ok(result) => {
            info!(
                "Email analysed by model: direction={:?}, score={:.1}",
                result.direction, result.overall_score
            );
            result
        }
        Err(e) => {
            warn!("Model analysis unavailable, using heuristic fallback: {e}");
            let mut result = analyze_heuristically(&request.subject, &request.body);
            result.direction = request.direction;
            result.fallback_note = Some(format!(
                "Heuristic analysis used because the model analysis was unavailable ({e})."
            ));
            result
        }
    }
}

async fn analyze_with_model(
    gateway: &dyn CompletionGateway,
    request: &EmailAnalysisRequest,
) -> Result<AnalysisResult, ModelPathError> {
    let prompt = compose_email_analysis_prompt(
        &request.subject,
        &request.body,
        request.colleague.as_ref(),
        request.direction,
    );
    let completion =
        CompletionRequest::new(prompt.user, ANALYSIS_MAX_TOKENS).with_system(prompt.system);

    let raw = gateway.complete(&completion).await?;
    Ok(parse_analysis(&raw, request.direction)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{ComplianceStatus, Provenance, RiskLevel};
    use crate::llm_client::testing::StubGateway;

    fn request(direction: EmailDirection) -> EmailAnalysisRequest {
        EmailAnalysisRequest {
            subject: "Project update".to_string(),
            body: "Hi Sam, please review the attached report. Thanks, Jo".to_string(),
            direction,
            colleague: None,
        }
    }

    #[tokio::test]
    async fn test_model_result_used_when_parseable() {
        let gateway = StubGateway::replying(
            r#"Analysis: {"overall_assessment": {"effectiveness_score": 9}}"#,
        );
        let result = analyze_email(&gateway, &request(EmailDirection::Outgoing)).await;
        assert_eq!(result.provenance, Provenance::Model);
        assert_eq!(result.overall_score, 9.0);
        assert!(result.fallback_note.is_none());
    }

    #[tokio::test]
    async fn test_system_prompt_sent_separately() {
        let gateway = StubGateway::replying("{}");
        analyze_email(&gateway, &request(EmailDirection::Outgoing)).await;
        let sent = gateway.last_request().unwrap();
        assert!(sent.system.unwrap().contains("CODE OF CONDUCT VALUES"));
        assert!(!sent.prompt.contains("CODE OF CONDUCT VALUES"));
        assert!(sent.prompt.contains("Hi Sam, please review"));
        assert!(sent.prior_turns.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_falls_back() {
        let gateway = StubGateway::failing(LlmError::Timeout { seconds: 30 });
        let result = analyze_email(&gateway, &request(EmailDirection::Incoming)).await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert_eq!(result.direction, EmailDirection::Incoming);
        assert_eq!(result.overall_score, 8.0);
        assert!(result.fallback_note.unwrap().contains("no response within 30s"));
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let gateway = StubGateway::failing(LlmError::NotConfigured);
        let result = analyze_email(&gateway, &request(EmailDirection::Outgoing)).await;
        assert_eq!(result.provenance, Provenance::Fallback);
    }

    #[tokio::test]
    async fn test_prose_reply_falls_back() {
        let gateway = StubGateway::replying("I'd rather not score this one.");
        let result = analyze_email(&gateway, &request(EmailDirection::Outgoing)).await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert!(result
            .fallback_note
            .unwrap()
            .contains("no structured payload"));
    }

    #[tokio::test]
    async fn test_broken_json_falls_back() {
        let gateway = StubGateway::replying("{effectiveness_score: 9,,}");
        let mut req = request(EmailDirection::Outgoing);
        req.body = "YOU ARE STUPID!!".to_string();
        let result = analyze_email(&gateway, &req).await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert_eq!(result.compliance.status, ComplianceStatus::Concerning);
        assert_eq!(result.compliance.risk_level, RiskLevel::High);
        assert!(result
            .fallback_note
            .unwrap()
            .contains("could not be parsed"));
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back() {
        let gateway = StubGateway::failing(LlmError::Upstream {
            status: 500,
            body: "boom".to_string(),
        });
        let result = analyze_email(&gateway, &request(EmailDirection::Outgoing)).await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert!(result.fallback_note.unwrap().contains("500"));
    }
}
