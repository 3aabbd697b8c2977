//! E-signature document and signatory model.
//!
//! # Responsibility
//! - Describe a contract envelope and the parties invited to sign it.
//! - Derive document status from signatory state.
//! - Apply external signing events to a signatory.
//!
//! # Invariants
//! - Signatory order is invitation order, not display order.
//! - Document status is COMPLETED iff every signatory is SIGNED,
//!   PARTIALLY_SIGNED iff some are, otherwise OUT_FOR_SIGNATURE.
//! - VOIDED is an external override and is never derived.
//! - Signatories are never removed once added.

use super::StatusEnum;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub type DocumentId = Uuid;
pub type SignatoryId = Uuid;

/// Signing state of one invited party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatoryStatus {
    /// Invitation sent, document not opened.
    NotSigned,
    /// Document opened but not signed.
    Viewed,
    /// Signature captured.
    Signed,
}

impl StatusEnum for SignatoryStatus {
    const ALL: &'static [Self] = &[Self::NotSigned, Self::Viewed, Self::Signed];

    fn as_str(self) -> &'static str {
        match self {
            Self::NotSigned => "NOT_SIGNED",
            Self::Viewed => "VIEWED",
            Self::Signed => "SIGNED",
        }
    }
}

/// Envelope-level signing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    OutForSignature,
    PartiallySigned,
    Completed,
    /// Cancelled by the sender; overrides signatory-derived state.
    Voided,
}

impl StatusEnum for DocumentStatus {
    const ALL: &'static [Self] = &[
        Self::OutForSignature,
        Self::PartiallySigned,
        Self::Completed,
        Self::Voided,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::OutForSignature => "OUT_FOR_SIGNATURE",
            Self::PartiallySigned => "PARTIALLY_SIGNED",
            Self::Completed => "COMPLETED",
            Self::Voided => "VOIDED",
        }
    }
}

/// A party invited to sign a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signatory {
    pub id: SignatoryId,
    pub name: String,
    pub email: String,
    pub status: SignatoryStatus,
    /// Set by the signing provider when the signature lands. May be absent
    /// even for SIGNED signatories in legacy records.
    #[serde(default)]
    pub signed_on: Option<DateTime<Utc>>,
}

impl Signatory {
    /// Creates an unsigned signatory with a generated ID.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            status: SignatoryStatus::NotSigned,
            signed_on: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.status == SignatoryStatus::Signed
    }

    /// Records that the signatory opened the document.
    ///
    /// A signed signatory stays signed.
    pub fn mark_viewed(&mut self) {
        if self.status == SignatoryStatus::NotSigned {
            self.status = SignatoryStatus::Viewed;
        }
    }

    /// Records a captured signature at `at`.
    pub fn mark_signed(&mut self, at: DateTime<Utc>) {
        self.status = SignatoryStatus::Signed;
        self.signed_on = Some(at);
    }

    /// Validates identity and contact fields.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankSignatoryName(self.id));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ModelValidationError::InvalidEmail {
                signatory: self.id,
                email: self.email.clone(),
            });
        }
        if self.signed_on.is_some() && !self.is_signed() {
            return Err(ModelValidationError::SignedOnWithoutSignature(self.id));
        }
        Ok(())
    }
}

/// Contract envelope tracked through the signing workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub status: DocumentStatus,
    pub sent_on: DateTime<Utc>,
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub signatories: Vec<Signatory>,
}

impl Document {
    /// Creates a document sent at `sent_on` with no signatories yet.
    pub fn new(title: impl Into<String>, sent_on: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status: DocumentStatus::OutForSignature,
            sent_on,
            completed_on: None,
            signatories: Vec::new(),
        }
    }

    /// Appends a signatory in invitation order and refreshes status.
    pub fn add_signatory(&mut self, signatory: Signatory) {
        self.signatories.push(signatory);
        self.sync_status();
    }

    pub fn signatory_mut(&mut self, id: SignatoryId) -> Option<&mut Signatory> {
        self.signatories.iter_mut().find(|signatory| signatory.id == id)
    }

    /// Returns `(signed, total)` signatory counts.
    pub fn signing_progress(&self) -> (usize, usize) {
        let signed = self
            .signatories
            .iter()
            .filter(|signatory| signatory.is_signed())
            .count();
        (signed, self.signatories.len())
    }

    /// Whether every signatory has signed. Vacuously true with no signatories.
    pub fn all_signed(&self) -> bool {
        self.signatories.iter().all(Signatory::is_signed)
    }

    /// First signatory in invitation order still missing a signature.
    pub fn first_pending_signatory(&self) -> Option<&Signatory> {
        self.signatories
            .iter()
            .find(|signatory| !signatory.is_signed())
    }

    /// Status implied by signatory state, keeping a VOIDED override.
    pub fn derived_status(&self) -> DocumentStatus {
        if self.status == DocumentStatus::Voided {
            return DocumentStatus::Voided;
        }

        let (signed, total) = self.signing_progress();
        if signed == total {
            DocumentStatus::Completed
        } else if signed > 0 {
            DocumentStatus::PartiallySigned
        } else {
            DocumentStatus::OutForSignature
        }
    }

    /// Writes `derived_status()` back into `status`.
    pub fn sync_status(&mut self) {
        self.status = self.derived_status();
    }

    pub fn void(&mut self) {
        self.status = DocumentStatus::Voided;
    }

    /// Validates document fields and every signatory.
    ///
    /// # Errors
    /// - Nil IDs, blank title or names, malformed e-mail addresses.
    /// - The same signatory ID appearing twice.
    /// - `completed_on` earlier than `sent_on`.
    /// - A stored status other than VOIDED that disagrees with
    ///   `derived_status()`.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::BlankTitle);
        }
        if let Some(completed_on) = self.completed_on {
            if completed_on < self.sent_on {
                return Err(ModelValidationError::CompletedBeforeSent {
                    sent_on: self.sent_on,
                    completed_on,
                });
            }
        }

        let mut seen = HashSet::with_capacity(self.signatories.len());
        for signatory in &self.signatories {
            signatory.validate()?;
            if !seen.insert(signatory.id) {
                return Err(ModelValidationError::DuplicateSignatory(signatory.id));
            }
        }

        let derived = self.derived_status();
        if self.status != derived {
            return Err(ModelValidationError::StatusMismatch {
                stored: self.status,
                derived,
            });
        }

        Ok(())
    }
}

/// Validation failures for model records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    NilId,
    BlankTitle,
    BlankSignatoryName(SignatoryId),
    InvalidEmail {
        signatory: SignatoryId,
        email: String,
    },
    DuplicateSignatory(SignatoryId),
    SignedOnWithoutSignature(SignatoryId),
    CompletedBeforeSent {
        sent_on: DateTime<Utc>,
        completed_on: DateTime<Utc>,
    },
    /// Stored status contradicts signatory state.
    StatusMismatch {
        stored: DocumentStatus,
        derived: DocumentStatus,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankSignatoryName(id) => write!(f, "signatory {id} has a blank name"),
            Self::InvalidEmail { signatory, email } => {
                write!(f, "signatory {signatory} has invalid email `{email}`")
            }
            Self::DuplicateSignatory(id) => write!(f, "duplicate signatory id: {id}"),
            Self::SignedOnWithoutSignature(id) => {
                write!(f, "signatory {id} has signedOn but is not SIGNED")
            }
            Self::CompletedBeforeSent {
                sent_on,
                completed_on,
            } => write!(
                f,
                "completedOn ({}) must be >= sentOn ({})",
                completed_on.to_rfc3339(),
                sent_on.to_rfc3339()
            ),
            Self::StatusMismatch { stored, derived } => write!(
                f,
                "status {} does not match signatories (expected {})",
                stored.as_str(),
                derived.as_str()
            ),
        }
    }
}

impl Error for ModelValidationError {}
