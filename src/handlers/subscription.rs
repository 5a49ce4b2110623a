use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::policy;
use crate::config::Config;
use crate::db::subscriptions as subscription_db;
use crate::error::ApiError;
use crate::events::{AuditEvent, EventSink, EventType};
use crate::models::subscriptions::{SubscriptionStatus, VerifyPayment};
use crate::models::users::Role;
use crate::payments::{
    CheckoutCustomer, CheckoutRequest, PaymentGateway, SUBSCRIPTION_PRICE_MWK,
};

/// POST /api/subscription/pay — start a hosted checkout for the fixed
/// monthly price and hand back the redirect URL.
pub async fn pay(
    user: AuthenticatedUser,
    config: web::Data<Config>,
    gateway: web::Data<Arc<dyn PaymentGateway>>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;

    let request = CheckoutRequest {
        amount: SUBSCRIPTION_PRICE_MWK,
        currency: "MWK".to_string(),
        provider: "mobile_money".to_string(),
        customer: CheckoutCustomer {
            name: user.0.full_name.clone(),
            email: user.0.email.clone(),
            phone: user.0.phone_number.clone(),
        },
        callback_url: format!("{}/api/subscription/verify", config.backend_url),
    };

    let session = gateway.create_checkout(request).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "checkoutUrl": session.checkout_url,
    })))
}

/// POST /api/subscription/verify — confirm the transaction with the gateway
/// and activate the worker's ledger row for one month from now.
///
/// All-or-nothing: a non-successful transaction changes nothing.
pub async fn verify(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<Arc<dyn PaymentGateway>>,
    sink: web::Data<Arc<dyn EventSink>>,
    body: web::Json<VerifyPayment>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;

    let transaction_id = body.into_inner().transaction_id;

    let transaction = gateway.verify_transaction(&transaction_id).await?;
    if !transaction.is_successful() {
        return Err(ApiError::invalid("Payment not successful"));
    }

    let subscription =
        subscription_db::activate(db.get_ref(), user.0.id, transaction_id.clone(), Utc::now())
            .await?;

    sink.publish(
        AuditEvent::new(EventType::SubscriptionCreated)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(user.0.id)
            .metadata(serde_json::json!({
                "transactionId": transaction_id,
                "expiresAt": subscription.expires_at,
            })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Subscription activated",
        "subscription": subscription,
    })))
}

/// GET /api/subscription/status — effective status with lazy expiry: an
/// expired window reads as inactive without touching the stored flag.
pub async fn status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;

    let response = match subscription_db::find_by_worker(db.get_ref(), user.0.id).await? {
        Some(sub) => SubscriptionStatus::from_row(&sub, Utc::now()),
        None => SubscriptionStatus::inactive(),
    };

    Ok(HttpResponse::Ok().json(response))
}
