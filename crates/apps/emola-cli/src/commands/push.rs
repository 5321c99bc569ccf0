//! Send a USSD payment prompt.

use emola_client::{EmolaClient, PaymentResponse};
use tracing::info;

use crate::cli::PaymentArgs;
use crate::commands::payment_request;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, PushOutput, Render};

/// Execute the push command.
pub async fn push(
    config: CliConfig,
    format: OutputFormat,
    args: &PaymentArgs,
    detail: bool,
) -> CliResult<String> {
    let client = EmolaClient::new(config.to_emola_config()?)?;
    let request = payment_request(args);

    info!(url = %client.url(), reference = %request.reference, "Sending USSD push");
    let detailed = client.payment().receive_detailed(&request).await?;

    let (balance, org_response_code) = if detail {
        (
            Some(detailed.balance.clone()),
            Some(detailed.org_response_code.clone()),
        )
    } else {
        (None, None)
    };

    let response = PaymentResponse::from(detailed);
    let status = if response.is_success() {
        "success"
    } else if response.is_processing() {
        "processing"
    } else if response.is_timeout() {
        "timeout"
    } else {
        "failed"
    };

    let output = PushOutput {
        trans_id: response.trans_id,
        error_code: response.error_code,
        message: response.message,
        status: status.to_string(),
        balance,
        org_response_code,
    };

    Ok(output.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use emola_client::{DetailResponse, EmolaError};
    use emola_test_utils::{detail_envelope, success_envelope, StubServer};

    fn args(reference: &str) -> PaymentArgs {
        PaymentArgs {
            phone: "861234567".into(),
            amount: "500".into(),
            reference: reference.into(),
            content: None,
        }
    }

    fn config_for(url: &str) -> CliConfig {
        let mut config = CliConfig::default();
        config.credentials.partner_code = "SHOP".into();
        config.credentials.partner_key = "k3y".into();
        config.credentials.username = "user".into();
        config.credentials.password = "secret".into();
        config.gateway.endpoint = Some(url.to_string());
        config.gateway.timeout_secs = 5;
        config
    }

    #[tokio::test]
    async fn test_push_success() {
        let server = StubServer::start(200, success_envelope("REF123")).await.unwrap();

        let output = push(
            config_for(&server.url()),
            OutputFormat::Json,
            &args("REF123"),
            false,
        )
        .await
        .unwrap();

        assert!(output.contains("\"trans_id\": \"REF123\""));
        assert!(output.contains("\"status\": \"success\""));
        assert!(!output.contains("balance"));
        assert_eq!(server.request_count(), 1);
    }

    #[tokio::test]
    async fn test_push_detail_shows_balance() {
        let detail = DetailResponse {
            error_code: "22".into(),
            message: "Processing".into(),
            trans_id: "REF5".into(),
            balance: "7000".into(),
            org_response_code: "01".into(),
        };
        let server = StubServer::start(200, detail_envelope(&detail)).await.unwrap();

        let output = push(
            config_for(&server.url()),
            OutputFormat::Json,
            &args("REF5"),
            true,
        )
        .await
        .unwrap();

        assert!(output.contains("\"status\": \"processing\""));
        assert!(output.contains("\"balance\": \"7000\""));
    }

    #[tokio::test]
    async fn test_push_missing_credentials() {
        let mut config = config_for("http://127.0.0.1:9/gw");
        config.credentials.username.clear();

        let err = push(config, OutputFormat::Human, &args("REF1"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Emola(EmolaError::Config(_))));
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn test_push_gateway_error_status() {
        let server = StubServer::start(503, "maintenance").await.unwrap();

        let err = push(
            config_for(&server.url()),
            OutputFormat::Human,
            &args("REF1"),
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("503"));
    }
}
