use chrono::{DateTime, TimeZone, Utc};
use incubator_core::{Document, DocumentStatus, ModelValidationError, Signatory, SignatoryStatus};
use uuid::Uuid;

fn october(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 10, day, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn sent_on() -> DateTime<Utc> {
    october(26)
}

#[test]
fn status_tracks_signatory_progress() {
    let mut document = Document::new("Incubation agreement", sent_on());
    let alice = Signatory::new("Alice", "alice@example.com");
    let bob = Signatory::new("Bob", "bob@example.com");
    let (alice_id, bob_id) = (alice.id, bob.id);
    document.add_signatory(alice);
    document.add_signatory(bob);
    assert_eq!(document.status, DocumentStatus::OutForSignature);

    document
        .signatory_mut(alice_id)
        .expect("signatory exists")
        .mark_signed(sent_on());
    document.sync_status();
    assert_eq!(document.status, DocumentStatus::PartiallySigned);
    assert_eq!(document.signing_progress(), (1, 2));
    let pending = document
        .first_pending_signatory()
        .expect("bob still pending");
    assert_eq!(pending.id, bob_id);

    document
        .signatory_mut(bob_id)
        .expect("signatory exists")
        .mark_signed(sent_on());
    document.sync_status();
    assert_eq!(document.status, DocumentStatus::Completed);
    assert!(document.first_pending_signatory().is_none());
}

#[test]
fn viewed_signatory_does_not_count_as_signed() {
    let mut document = Document::new("NDA", sent_on());
    let mut viewer = Signatory::new("Alice", "alice@example.com");
    viewer.mark_viewed();
    document.add_signatory(viewer);

    assert_eq!(document.derived_status(), DocumentStatus::OutForSignature);
    assert_eq!(document.signatories[0].status, SignatoryStatus::Viewed);
}

#[test]
fn empty_document_derives_completed() {
    let document = Document::new("Acknowledgement", sent_on());
    assert_eq!(document.derived_status(), DocumentStatus::Completed);
    assert!(document.all_signed());
}

#[test]
fn validate_rejects_duplicate_signatory_ids() {
    let mut document = Document::new("NDA", sent_on());
    let alice = Signatory::new("Alice", "alice@example.com");
    document.add_signatory(alice.clone());
    document.add_signatory(alice.clone());

    let err = document.validate().expect_err("validation should fail");
    assert_eq!(err, ModelValidationError::DuplicateSignatory(alice.id));
}

#[test]
fn validate_rejects_malformed_email() {
    let mut document = Document::new("NDA", sent_on());
    let signatory = Signatory::new("Alice", "alice-at-example");
    let id = signatory.id;
    document.add_signatory(signatory);

    let err = document.validate().expect_err("validation should fail");
    assert_eq!(
        err,
        ModelValidationError::InvalidEmail {
            signatory: id,
            email: "alice-at-example".to_string(),
        }
    );
}

#[test]
fn validate_rejects_completion_before_send() {
    let mut document = Document::new("NDA", sent_on());
    document.completed_on = Some(october(25));

    let err = document.validate().expect_err("validation should fail");
    assert!(
        err.to_string().contains("must be >= sentOn"),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_accepts_signed_without_timestamp() {
    let mut document = Document::new("NDA", sent_on());
    let mut legacy = Signatory::new("Alice", "alice@example.com");
    legacy.status = SignatoryStatus::Signed;
    document.add_signatory(legacy);

    assert!(document.validate().is_ok());
}

#[test]
fn document_deserializes_from_camel_case_payload() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "SAFE",
        "status": "PARTIALLY_SIGNED",
        "sentOn": "2023-10-26T10:00:00Z",
        "signatories": [
            {
                "id": "21111111-2222-4333-8444-555555555555",
                "name": "Alice",
                "email": "alice@example.com",
                "status": "SIGNED",
                "signedOn": "2023-10-27T09:00:00Z"
            },
            {
                "id": "31111111-2222-4333-8444-555555555555",
                "name": "Bob",
                "email": "bob@example.com",
                "status": "NOT_SIGNED"
            }
        ]
    });

    let document: Document =
        serde_json::from_value(value).expect("payload should deserialize");
    assert_eq!(
        document.id,
        Uuid::parse_str("11111111-2222-4333-8444-555555555555").expect("valid uuid")
    );
    assert_eq!(document.sent_on, sent_on());
    assert_eq!(document.completed_on, None);
    assert_eq!(document.signatories[1].signed_on, None);
    assert_eq!(document.derived_status(), document.status);

    let json = serde_json::to_value(&document).expect("value should serialize");
    assert_eq!(json["signatories"][0]["signedOn"], "2023-10-27T09:00:00Z");
    assert_eq!(json["status"], "PARTIALLY_SIGNED");
}

#[test]
fn validate_rejects_stored_status_contradicting_signatories() {
    let mut document = Document::new("Incubation agreement", sent_on());
    document.add_signatory(Signatory::new("Alice", "alice@example.com"));
    document.status = DocumentStatus::Completed;

    let err = document.validate().expect_err("validation should fail");
    assert_eq!(
        err,
        ModelValidationError::StatusMismatch {
            stored: DocumentStatus::Completed,
            derived: DocumentStatus::OutForSignature,
        }
    );
    assert!(err.to_string().contains("expected OUT_FOR_SIGNATURE"));

    document.sync_status();
    assert!(document.validate().is_ok());
}

#[test]
fn validate_accepts_voided_override_regardless_of_signatories() {
    let mut document = Document::new("Incubation agreement", sent_on());
    let mut alice = Signatory::new("Alice", "alice@example.com");
    alice.mark_signed(october(27));
    document.add_signatory(alice);
    document.add_signatory(Signatory::new("Bob", "bob@example.com"));
    document.void();

    assert_eq!(document.derived_status(), DocumentStatus::Voided);
    assert!(document.validate().is_ok());
}
