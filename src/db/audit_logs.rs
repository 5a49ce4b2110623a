use sea_orm::*;

use crate::models::audit_logs;

/// Page through the audit trail, newest first. `event_filter` accepts an
/// exact slug or a category wildcard (`admin/*`). No update or delete path
/// exists for this table.
pub async fn list(
    db: &DatabaseConnection,
    event_filter: Option<&str>,
    page: u64,
    limit: u64,
) -> Result<(Vec<audit_logs::Model>, u64), DbErr> {
    let mut query = audit_logs::Entity::find();

    if let Some(filter) = event_filter {
        query = match filter.strip_suffix("/*") {
            Some(category) => {
                query.filter(audit_logs::Column::EventType.starts_with(format!("{category}/")))
            }
            None => query.filter(audit_logs::Column::EventType.eq(filter)),
        };
    }

    let paginator = query
        .order_by_desc(audit_logs::Column::CreatedAt)
        .paginate(db, limit);

    let total = paginator.num_items().await?;
    let logs = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((logs, total))
}

#[cfg(test)]
mod tests {
    use crate::events::EventType;

    /// In-memory model of the filter `list` builds in SQL: a `category/*`
    /// wildcard becomes a `starts_with("{category}/")` match, anything else
    /// is an exact slug comparison.
    fn matches_filter(slug: &str, filter: &str) -> bool {
        match filter.strip_suffix("/*") {
            Some(category) => slug.starts_with(&format!("{category}/")),
            None => slug == filter,
        }
    }

    #[test]
    fn wildcard_filter_matches_whole_category() {
        assert!(matches_filter(EventType::WorkerSuspended.as_str(), "admin/*"));
        assert!(matches_filter(EventType::WorkerUnsuspended.as_str(), "admin/*"));
        assert!(!matches_filter(EventType::JobCompleted.as_str(), "admin/*"));
    }

    #[test]
    fn exact_filter_matches_one_slug() {
        assert!(matches_filter("job/completed", "job/completed"));
        assert!(!matches_filter("job/cancelled", "job/completed"));
    }

    #[test]
    fn every_slug_is_reachable_through_its_category_wildcard() {
        for event in [
            EventType::UserCreated,
            EventType::WorkerSuspended,
            EventType::WorkerUnsuspended,
            EventType::ProposalSubmitted,
            EventType::WorkerAssigned,
            EventType::JobCompleted,
            EventType::JobCancelled,
            EventType::SubscriptionCreated,
            EventType::SubscriptionDeactivated,
        ] {
            let wildcard = format!("{}/*", event.category());
            assert!(matches_filter(event.as_str(), &wildcard), "{wildcard}");
        }
    }
}
