//! Fixture seeding for the three seedable collections.
//!
//! Listing routes call this before reading so a fresh deployment shows demo
//! data. The count check makes repeat calls no-ops. Two requests racing past
//! an empty count can each insert the fixtures; that duplicate-seed window is
//! a known, tolerated limitation rather than something a lock prevents.

use crate::db::{DocQuery, DocumentStore};
use crate::errors::AppError;
use crate::models::{CaseItem, IntelItem, TimelineItem};

/// Populate intel, cases and timeline with their fixture rows if empty.
pub async fn ensure_seed_data(store: &DocumentStore) -> Result<(), AppError> {
    if store.count::<IntelItem>(&DocQuery::new()).await? == 0 {
        tracing::info!("Seeding intel_events with fixture rows");
        store.insert_many(&intel_fixtures()).await?;
    }

    if store.count::<CaseItem>(&DocQuery::new()).await? == 0 {
        tracing::info!("Seeding cases with fixture rows");
        store.insert_many(&case_fixtures()).await?;
    }

    if store.count::<TimelineItem>(&DocQuery::new()).await? == 0 {
        tracing::info!("Seeding timelines with fixture rows");
        store.insert_many(&timeline_fixtures()).await?;
    }

    Ok(())
}

fn intel_fixtures() -> Vec<IntelItem> {
    vec![
        IntelItem::new(
            "License plate match near Sector 7",
            "high",
            tags(&["ANPR", "vehicle"]),
        ),
        IntelItem::new(
            "ATM fraud pattern detected",
            "medium",
            tags(&["financial", "pattern"]),
        ),
        IntelItem::new(
            "Irregular comms burst on known channel",
            "critical",
            tags(&["radio", "signal"]),
        ),
        IntelItem::new(
            "Face match at transit hub",
            "high",
            tags(&["facial", "transit"]),
        ),
        IntelItem::new(
            "Anonymous tip - warehouse meetup",
            "low",
            tags(&["tip", "warehouse"]),
        ),
    ]
}

fn case_fixtures() -> Vec<CaseItem> {
    vec![
        CaseItem::new("Operation Blackline", "active", "P1", "A. Shaw", 14),
        CaseItem::new("Courier Sting", "active", "P2", "D. Reyes", 7),
        CaseItem::new("Wire Sweep", "backlog", "P3", "T. Khan", 3),
        CaseItem::new("Safehouse Audit", "backlog", "P2", "E. Chen", 2),
        CaseItem::new("Ghost Ledger", "archived", "P4", "S. Patel", 23),
    ]
}

fn timeline_fixtures() -> Vec<TimelineItem> {
    vec![
        TimelineItem::new("ingest", "Surveillance batch processed (482 frames)."),
        TimelineItem::new("match", "License plate partial match confidence 0.79."),
        TimelineItem::new("dispatch", "Team BRAVO dispatched to perimeter."),
        TimelineItem::new("update", "Case priority raised to P2."),
        TimelineItem::new("secure", "New classified memo uploaded."),
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
