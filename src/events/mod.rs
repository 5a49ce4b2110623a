//! Audit/event sink: every state-changing administrative or job-lifecycle
//! action publishes an event here. Publishing is fire-and-forget — a failed
//! write is logged and never affects the triggering request.

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::models::audit_logs;

/// Closed set of auditable actions, serialized as `category/name` slugs so
/// consumers can subscribe per category (`admin/*`, `job/*`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    UserCreated,
    WorkerSuspended,
    WorkerUnsuspended,
    ProposalSubmitted,
    WorkerAssigned,
    JobCompleted,
    JobCancelled,
    SubscriptionCreated,
    SubscriptionDeactivated,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::UserCreated => "user/created",
            EventType::WorkerSuspended => "admin/worker.suspended",
            EventType::WorkerUnsuspended => "admin/worker.unsuspended",
            EventType::ProposalSubmitted => "job/proposal.submitted",
            EventType::WorkerAssigned => "job/worker.assigned",
            EventType::JobCompleted => "job/completed",
            EventType::JobCancelled => "job/cancelled",
            EventType::SubscriptionCreated => "subscription/created",
            EventType::SubscriptionDeactivated => "subscription/deactivated",
        }
    }

    /// The part before the slash.
    pub fn category(&self) -> &'static str {
        let slug = self.as_str();
        &slug[..slug.find('/').unwrap_or(slug.len())]
    }
}

/// One published event. `metadata` is free-form context for analytics
/// (job title, reason, transaction id, ...).
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub event_type: EventType,
    pub actor_subject: Option<String>,
    pub actor_email: Option<String>,
    pub target_user_id: Option<Uuid>,
    pub metadata: serde_json::Value,
}

impl AuditEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            actor_subject: None,
            actor_email: None,
            target_user_id: None,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn actor(mut self, subject: impl Into<String>, email: impl Into<String>) -> Self {
        self.actor_subject = Some(subject.into());
        self.actor_email = Some(email.into());
        self
    }

    pub fn target(mut self, user_id: Uuid) -> Self {
        self.target_user_id = Some(user_id);
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// The injectable sink. Callers only ever publish.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: AuditEvent);
}

/// Production sink: appends to `audit_logs` on a spawned task so the
/// triggering request never waits on (or fails with) the write.
pub struct DbEventSink {
    db: DatabaseConnection,
}

impl DbEventSink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl EventSink for DbEventSink {
    fn publish(&self, event: AuditEvent) {
        let db = self.db.clone();
        tokio::spawn(async move {
            let slug = event.event_type.as_str();
            tracing::info!(
                event = slug,
                category = event.event_type.category(),
                "audit event"
            );

            let row = audit_logs::ActiveModel {
                id: Set(Uuid::new_v4()),
                event_type: Set(slug.to_string()),
                actor_subject: Set(event.actor_subject),
                actor_email: Set(event.actor_email),
                target_user_id: Set(event.target_user_id),
                metadata: Set(event.metadata),
                created_at: Set(chrono::Utc::now()),
            };

            if let Err(err) = row.insert(&db).await {
                // An audit failure never rolls back the mutation that
                // triggered it.
                tracing::warn!("failed to write audit log {slug}: {err}");
            }
        });
    }
}

/// Test double: records published events in memory.
#[derive(Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<AuditEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("sink lock poisoned").clone()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: AuditEvent) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_stable() {
        assert_eq!(EventType::WorkerSuspended.as_str(), "admin/worker.suspended");
        assert_eq!(EventType::ProposalSubmitted.as_str(), "job/proposal.submitted");
        assert_eq!(EventType::SubscriptionCreated.as_str(), "subscription/created");
    }

    #[test]
    fn categories_come_from_the_slug() {
        assert_eq!(EventType::WorkerSuspended.category(), "admin");
        assert_eq!(EventType::JobCompleted.category(), "job");
        assert_eq!(EventType::UserCreated.category(), "user");
    }

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::new();
        let target = Uuid::new_v4();
        sink.publish(
            AuditEvent::new(EventType::WorkerSuspended)
                .actor("user_admin", "admin@example.com")
                .target(target)
                .metadata(serde_json::json!({"reason": "spam"})),
        );

        let published = sink.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type, EventType::WorkerSuspended);
        assert_eq!(published[0].target_user_id, Some(target));
        assert_eq!(published[0].metadata["reason"], "spam");
    }
}
