//! Payment gateway adapter. PayChangu hosts the checkout page and owns the
//! money movement; this module only starts a checkout session and looks up
//! a transaction's status afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Monthly worker subscription price, Malawi Kwacha.
pub const SUBSCRIPTION_PRICE_MWK: u32 = 5000;

/// Gateway status string that counts as a completed payment.
pub const STATUS_SUCCESSFUL: &str = "successful";

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub amount: u32,
    pub currency: String,
    pub provider: String,
    pub customer: CheckoutCustomer,
    pub callback_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub status: String,
}

impl Transaction {
    pub fn is_successful(&self) -> bool {
        self.status == STATUS_SUCCESSFUL
    }
}

/// Injectable gateway seam: the production client talks HTTP, tests use a
/// stub implementation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout(&self, request: CheckoutRequest) -> Result<CheckoutSession, ApiError>;
    async fn verify_transaction(&self, transaction_id: &str) -> Result<Transaction, ApiError>;
}

/// Production PayChangu client.
pub struct PayChanguClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PayChanguClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for PayChanguClient {
    async fn create_checkout(&self, request: CheckoutRequest) -> Result<CheckoutSession, ApiError> {
        let url = format!("{}/checkout/inline", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("checkout request failed: {e}");
                ApiError::upstream("Payment gateway unreachable")
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("checkout returned HTTP {status}");
            return Err(ApiError::upstream("Failed to create checkout"));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| {
                tracing::error!("checkout response was not JSON: {e}");
                ApiError::upstream("Failed to create checkout")
            })?;

        match body["checkout_url"].as_str() {
            Some(checkout_url) => Ok(CheckoutSession {
                checkout_url: checkout_url.to_string(),
            }),
            None => Err(ApiError::upstream("Failed to create checkout")),
        }
    }

    async fn verify_transaction(&self, transaction_id: &str) -> Result<Transaction, ApiError> {
        let url = format!("{}/transaction/{transaction_id}", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("transaction lookup failed: {e}");
                ApiError::upstream("Payment gateway unreachable")
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("transaction lookup returned HTTP {status}");
            return Err(ApiError::upstream("Could not verify payment"));
        }

        response.json::<Transaction>().await.map_err(|e| {
            tracing::error!("transaction response was not JSON: {e}");
            ApiError::upstream("Could not verify payment")
        })
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Stub gateway with canned responses.
    pub struct StubGateway {
        pub checkout_url: Option<String>,
        pub transaction_status: String,
    }

    impl StubGateway {
        pub fn successful() -> Self {
            Self {
                checkout_url: Some("https://pay.example.test/session/1".to_string()),
                transaction_status: STATUS_SUCCESSFUL.to_string(),
            }
        }

        pub fn failing_payment() -> Self {
            Self {
                checkout_url: Some("https://pay.example.test/session/2".to_string()),
                transaction_status: "failed".to_string(),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn create_checkout(
            &self,
            _request: CheckoutRequest,
        ) -> Result<CheckoutSession, ApiError> {
            match &self.checkout_url {
                Some(url) => Ok(CheckoutSession {
                    checkout_url: url.clone(),
                }),
                None => Err(ApiError::upstream("Failed to create checkout")),
            }
        }

        async fn verify_transaction(&self, _transaction_id: &str) -> Result<Transaction, ApiError> {
            Ok(Transaction {
                status: self.transaction_status.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StubGateway;
    use super::*;

    #[test]
    fn only_the_success_sentinel_counts() {
        assert!(Transaction { status: "successful".to_string() }.is_successful());
        for other in ["failed", "pending", "SUCCESSFUL", ""] {
            assert!(
                !Transaction { status: other.to_string() }.is_successful(),
                "{other:?}"
            );
        }
    }

    #[tokio::test]
    async fn stub_gateway_without_url_is_upstream_error() {
        let gateway = StubGateway {
            checkout_url: None,
            transaction_status: STATUS_SUCCESSFUL.to_string(),
        };
        let request = CheckoutRequest {
            amount: SUBSCRIPTION_PRICE_MWK,
            currency: "MWK".to_string(),
            provider: "mobile_money".to_string(),
            customer: CheckoutCustomer {
                name: "Thoko Banda".to_string(),
                email: "thoko@example.com".to_string(),
                phone: Some("+265991234567".to_string()),
            },
            callback_url: "https://backend.example/api/subscription/verify".to_string(),
        };
        let err = gateway.create_checkout(request).await.unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::BAD_GATEWAY);
    }
}
