//! Configuration for PDF/A validation.
//!
//! The embedded-file policy differs between PDF/A parts, so it is kept as a table keyed
//! by part rather than hard-coded in the rule. The table can be loaded from JSON:
//!
//! ```json
//! {
//!   "embedded_files": {
//!     "part1": "forbidden",
//!     "part2": { "allow_list": ["application/pdf"] },
//!     "part3": { "unrestricted": { "require_af_relationship": true } }
//!   }
//! }
//! ```
//!
//! A part set to `null` has no embedded-file rule at all.

use crate::compliance::PdfAPart;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// MIME type of PDF documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// What a PDF/A part allows for embedded files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedFilePolicy {
    /// File specifications must not embed file streams.
    Forbidden,
    /// Embedded files must declare one of these MIME types.
    AllowList(Vec<String>),
    /// Any declared MIME type is accepted.
    Unrestricted {
        /// Whether each file specification must carry an `/AFRelationship`.
        #[serde(default)]
        require_af_relationship: bool,
    },
}

impl EmbeddedFilePolicy {
    /// Policy accepting only PDF payloads.
    pub fn pdf_only() -> Self {
        EmbeddedFilePolicy::AllowList(vec![PDF_MIME_TYPE.to_string()])
    }

    /// Whether a declared MIME type passes an allow list.
    ///
    /// MIME types compare case-insensitively.
    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        match self {
            EmbeddedFilePolicy::Forbidden => false,
            EmbeddedFilePolicy::AllowList(allowed) => allowed
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(mime_type)),
            EmbeddedFilePolicy::Unrestricted { .. } => true,
        }
    }
}

/// Embedded-file policy per PDF/A part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedFilePolicyTable {
    /// PDF/A-1 policy.
    pub part1: Option<EmbeddedFilePolicy>,
    /// PDF/A-2 policy.
    pub part2: Option<EmbeddedFilePolicy>,
    /// PDF/A-3 policy.
    pub part3: Option<EmbeddedFilePolicy>,
}

impl Default for EmbeddedFilePolicyTable {
    fn default() -> Self {
        Self {
            part1: Some(EmbeddedFilePolicy::Forbidden),
            part2: Some(EmbeddedFilePolicy::pdf_only()),
            part3: Some(EmbeddedFilePolicy::Unrestricted {
                require_af_relationship: true,
            }),
        }
    }
}

impl EmbeddedFilePolicyTable {
    /// Policy for a part, if the part has one.
    pub fn for_part(&self, part: PdfAPart) -> Option<&EmbeddedFilePolicy> {
        match part {
            PdfAPart::Part1 => self.part1.as_ref(),
            PdfAPart::Part2 => self.part2.as_ref(),
            PdfAPart::Part3 => self.part3.as_ref(),
        }
    }

    /// Replace the policy for a part.
    pub fn set(&mut self, part: PdfAPart, policy: Option<EmbeddedFilePolicy>) {
        match part {
            PdfAPart::Part1 => self.part1 = policy,
            PdfAPart::Part2 => self.part2 = policy,
            PdfAPart::Part3 => self.part3 = policy,
        }
    }
}

/// PDF/A validation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Embedded-file policy table.
    #[serde(default)]
    pub embedded_files: EmbeddedFilePolicyTable,
}

impl ValidationConfig {
    /// Create configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embedded-file policy of one part.
    pub fn with_embedded_file_policy(
        mut self,
        part: PdfAPart,
        policy: Option<EmbeddedFilePolicy>,
    ) -> Self {
        self.embedded_files.set(part, policy);
        self
    }

    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
