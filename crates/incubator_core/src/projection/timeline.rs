//! Signing timeline for a contract document.
//!
//! # Responsibility
//! - Derive an ordered event sequence from a document and its signatories.
//! - Append one synthetic trailing event: the pending step or completion.
//!
//! # Invariants
//! - Sent and signed events are sorted ascending by date; equal dates keep
//!   insertion order.
//! - Exactly one trailing synthetic event is appended.
//! - At most one event has `is_current = true`, and only when incomplete.
//! - A SIGNED signatory without `signed_on` contributes no event.

use crate::model::document::Document;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

const SENT_TITLE: &str = "Document Sent";
const COMPLETED_TITLE: &str = "Completed";
const COMPLETED_DESCRIPTION: &str = "All signatories have signed.";
const PENDING_DESCRIPTION: &str = "Next step in the signing process.";
const PENDING_FALLBACK_TITLE: &str = "Awaiting signatures";

/// One step in a document's signing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub is_completed: bool,
    pub is_current: bool,
}

impl TimelineEvent {
    fn completed(
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date,
            is_completed: true,
            is_current: false,
        }
    }

    fn current(
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date,
            is_completed: false,
            is_current: true,
        }
    }
}

/// Ordered timeline plus the completion verdict it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    /// Every signatory is SIGNED. True for a document with no signatories.
    pub is_complete: bool,
    /// SIGNED signatories dropped for lacking a `signed_on` timestamp.
    pub skipped_signatures: usize,
}

impl Timeline {
    /// The pending step, when the document is not complete.
    pub fn current(&self) -> Option<&TimelineEvent> {
        self.events.iter().find(|event| event.is_current)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builds the timeline using the wall clock for synthetic events.
pub fn build_timeline(document: &Document) -> Timeline {
    build_timeline_at(document, Utc::now())
}

/// Builds the timeline with `now` as the date of synthetic events.
///
/// Output is fully determined by `document` and `now`.
pub fn build_timeline_at(document: &Document, now: DateTime<Utc>) -> Timeline {
    let mut events = Vec::with_capacity(document.signatories.len() + 2);
    events.push(TimelineEvent::completed(
        SENT_TITLE,
        format!("Sent to {} signatories.", document.signatories.len()),
        document.sent_on,
    ));

    let mut skipped_signatures = 0;
    for signatory in document.signatories.iter().filter(|s| s.is_signed()) {
        match signatory.signed_on {
            Some(signed_on) => events.push(TimelineEvent::completed(
                format!("Signed by {}", signatory.name),
                format!("{} signed the document.", signatory.email),
                signed_on,
            )),
            None => skipped_signatures += 1,
        }
    }

    // `sort_by_key` is stable, so equal dates keep insertion order.
    events.sort_by_key(|event| event.date);

    let is_complete = document.all_signed();
    if is_complete {
        events.push(TimelineEvent::completed(
            COMPLETED_TITLE,
            COMPLETED_DESCRIPTION,
            document.completed_on.unwrap_or(now),
        ));
    } else {
        let title = document
            .first_pending_signatory()
            .map(|signatory| format!("Awaiting signature from {}", signatory.name))
            .unwrap_or_else(|| PENDING_FALLBACK_TITLE.to_string());
        events.push(TimelineEvent::current(title, PENDING_DESCRIPTION, now));
    }

    debug!(
        "event=timeline_build module=timeline status=ok document={} events={} complete={} skipped_signatures={}",
        document.id,
        events.len(),
        is_complete,
        skipped_signatures
    );

    Timeline {
        events,
        is_complete,
        skipped_signatures,
    }
}

#[cfg(test)]
mod tests {
    use super::build_timeline_at;
    use crate::model::document::{Document, Signatory};
    use chrono::{DateTime, TimeZone, Utc};

    fn march(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn signatures_on_equal_dates_keep_invitation_order() {
        let sent_on = march(1);
        let signed_on = march(2);
        let mut document = Document::new("SAFE note", sent_on);
        for name in ["Bea", "Ana", "Cy"] {
            let email = format!("{}@example.com", name.to_lowercase());
            let mut signatory = Signatory::new(name, email);
            signatory.mark_signed(signed_on);
            document.add_signatory(signatory);
        }

        let timeline = build_timeline_at(&document, signed_on);
        let titles: Vec<&str> = timeline.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Document Sent",
                "Signed by Bea",
                "Signed by Ana",
                "Signed by Cy",
                "Completed"
            ]
        );
    }

    #[test]
    fn out_of_order_signatures_are_sorted_by_date() {
        let sent_on = march(1);
        let mut document = Document::new("Term sheet", sent_on);
        let mut late = Signatory::new("Late", "late@example.com");
        late.mark_signed(march(5));
        let mut early = Signatory::new("Early", "early@example.com");
        early.mark_signed(march(3));
        document.add_signatory(late);
        document.add_signatory(early);

        let timeline = build_timeline_at(&document, sent_on);
        assert_eq!(timeline.events[1].title, "Signed by Early");
        assert_eq!(timeline.events[2].title, "Signed by Late");
    }
}
