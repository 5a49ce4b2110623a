pub mod admin;
pub mod jobs;
pub mod onboarding;
pub mod profile;
pub mod subscription;

use actix_web::{HttpResponse, Responder, web};

/// GET /api/health — unauthenticated liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "OK" }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));

    // ── Onboarding (authenticated; one-shot per account) ──
    cfg.service(
        web::scope("/onboarding")
            .route("/worker", web::post().to(onboarding::complete_worker))
            .route("/employer", web::post().to(onboarding::complete_employer)),
    );

    // ── Profile (authenticated self-service) ──
    cfg.service(
        web::scope("/profile")
            .route("/me", web::get().to(profile::me))
            .route("/update", web::put().to(profile::update)),
    );

    // ── Job board ──
    cfg.service(
        web::scope("/jobs")
            // employer routes
            .route("/create", web::post().to(jobs::create_job))
            .route("/my-jobs", web::get().to(jobs::get_my_jobs))
            .route("/assign", web::post().to(jobs::assign_worker))
            .route("/cancel", web::post().to(jobs::cancel_job))
            .route("/proposals/{job_id}", web::get().to(jobs::get_job_proposals))
            // worker routes
            .route("/open", web::get().to(jobs::get_open_jobs))
            .route("/assigned", web::get().to(jobs::get_assigned_jobs))
            .route("/proposal", web::post().to(jobs::submit_proposal))
            .route("/complete", web::post().to(jobs::complete_job)),
    );

    // ── Subscription (worker-only) ──
    cfg.service(
        web::scope("/subscription")
            .route("/pay", web::post().to(subscription::pay))
            .route("/verify", web::post().to(subscription::verify))
            .route("/status", web::get().to(subscription::status)),
    );

    // ── Admin back-office ──
    cfg.service(
        web::scope("/admin")
            .route("/workers", web::get().to(admin::get_workers))
            .route("/employers", web::get().to(admin::get_employers))
            .route("/jobs", web::get().to(admin::get_jobs))
            .route("/subscriptions", web::get().to(admin::get_subscriptions))
            .route(
                "/subscriptions/deactivate/{subscription_id}",
                web::patch().to(admin::deactivate_subscription),
            )
            .route("/suspend/{user_id}", web::post().to(admin::suspend_user))
            .route("/unsuspend/{user_id}", web::post().to(admin::unsuspend_user))
            .route("/audit-logs", web::get().to(admin::get_audit_logs))
            .route("/analytics", web::get().to(admin::get_analytics)),
    );
}
