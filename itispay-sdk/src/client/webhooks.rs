//! Webhook simulation endpoint.

use reqwest::Method;

use super::{ClientError, ItisPayClient, decode};
use crate::objects::webhook::{WebhookSimulateRequest, WebhookSimulateResponse};

impl ItisPayClient {
    /// `POST /webhooks/simulate` – ask the server to fire the invoice's
    /// webhook with `status`, without a real payment.
    ///
    /// The server does not authenticate this endpoint; the `Api-key` header
    /// is still sent when configured.
    pub async fn simulate_webhook(
        &self,
        invoice_id: &str,
        status: impl AsRef<str>,
    ) -> Result<WebhookSimulateResponse, ClientError> {
        let req = WebhookSimulateRequest {
            invoice_id: invoice_id.to_owned(),
            status: status.as_ref().to_owned(),
        };
        let body = self
            .execute(Method::POST, "/webhooks/simulate", Some(&req))
            .await?;
        decode("webhook simulation", &body)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{client_with_key, test_client};
    use crate::objects::InvoiceStatus;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_simulate_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/webhooks/simulate"))
            .and(body_json(json!({ "invoice_id": "inv_1", "status": "completed" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Webhook simulated for invoice inv_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .simulate_webhook("inv_1", InvoiceStatus::Completed)
            .await
            .unwrap();
        assert_eq!(resp.status, "success");
        assert_eq!(resp.message, "Webhook simulated for invoice inv_1");
    }

    #[tokio::test]
    async fn test_simulate_webhook_without_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/webhooks/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "ok"
            })))
            .mount(&server)
            .await;

        let resp = client_with_key(&server, "")
            .simulate_webhook("inv_1", "expired")
            .await
            .unwrap();
        assert_eq!(resp.status, "success");
    }

    #[tokio::test]
    async fn test_simulate_webhook_unknown_invoice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/webhooks/simulate"))
            .respond_with(ResponseTemplate::new(404).set_body_string("invoice not found"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .simulate_webhook("nope", "completed")
            .await
            .unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.status, 404);
        assert!(api.error_type.is_empty());
        assert_eq!(api.message, "invoice not found");
    }
}
