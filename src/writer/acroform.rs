//! AcroForm builder for interactive PDF forms.
//!
//! Implements the document-level AcroForm dictionary per ISO 32000-1:2008 Section 12.7.2.
//!
//! PDF/A forbids `/NeedAppearances true`, so the builder leaves the flag out unless it is
//! set explicitly. A form built with [`AcroFormBuilder::need_appearances`] is rejected
//! when the document is closed.
//!
//! # Example
//!
//! ```ignore
//! use pdfa_guard::writer::AcroFormBuilder;
//!
//! let acroform = AcroFormBuilder::new()
//!     .with_default_appearance("/Helv 12 Tf 0 g");
//! document.set_acro_form(&acroform);
//! ```

use crate::object::{Dictionary, Object, ObjectRef};

/// Builder for the document-level AcroForm dictionary.
#[derive(Debug, Clone, Default)]
pub struct AcroFormBuilder {
    /// Field object references
    fields: Vec<ObjectRef>,
    /// `None` leaves `/NeedAppearances` out of the dictionary
    need_appearances: Option<bool>,
    /// Signature flags
    sig_flags: Option<u32>,
    /// Default appearance string
    default_appearance: Option<String>,
    /// Calculation order (field refs in order to calculate)
    calc_order: Vec<ObjectRef>,
    /// Whether to embed the standard form fonts as `/DR`
    default_resources: bool,
}

impl AcroFormBuilder {
    /// Create a new AcroForm builder without `/NeedAppearances`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field reference.
    pub fn add_field(&mut self, field_ref: ObjectRef) {
        self.fields.push(field_ref);
    }

    /// Add multiple field references.
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = ObjectRef>) {
        self.fields.extend(fields);
    }

    /// Ask the viewer to regenerate field appearances (`/NeedAppearances true`).
    pub fn need_appearances(mut self) -> Self {
        self.need_appearances = Some(true);
        self
    }

    /// Write `/NeedAppearances` with an explicit value.
    pub fn with_need_appearances(mut self, need: bool) -> Self {
        self.need_appearances = Some(need);
        self
    }

    /// Set the default appearance string.
    ///
    /// Format: "/FontName size Tf r g b rg" (e.g., "/Helv 12 Tf 0 g")
    pub fn with_default_appearance(mut self, da: impl Into<String>) -> Self {
        self.default_appearance = Some(da.into());
        self
    }

    /// Set signature flags.
    ///
    /// Per PDF spec Table 219:
    /// - Bit 1: SignaturesExist - document contains signatures
    /// - Bit 2: AppendOnly - document shall be saved with incremental updates
    pub fn with_sig_flags(mut self, flags: u32) -> Self {
        self.sig_flags = Some(flags);
        self
    }

    /// Mark document as containing signatures.
    pub fn signatures_exist(mut self) -> Self {
        self.sig_flags = Some(self.sig_flags.unwrap_or(0) | 1);
        self
    }

    /// Mark document as append-only (for signed documents).
    pub fn append_only(mut self) -> Self {
        self.sig_flags = Some(self.sig_flags.unwrap_or(0) | 2);
        self
    }

    /// Set the calculation order for calculated fields.
    pub fn with_calc_order(mut self, order: Vec<ObjectRef>) -> Self {
        self.calc_order = order;
        self
    }

    /// Embed the standard form fonts as default resources.
    pub fn with_default_resources(mut self) -> Self {
        self.default_resources = true;
        self
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The `/NeedAppearances` value that will be written, if any.
    pub fn need_appearances_flag(&self) -> Option<bool> {
        self.need_appearances
    }

    /// Build the AcroForm dictionary.
    pub fn build(&self) -> Dictionary {
        let mut dict = Dictionary::new();

        let fields = self.fields.iter().copied().map(Object::Reference).collect();
        dict.insert("Fields".to_string(), Object::Array(fields));

        if let Some(need) = self.need_appearances {
            dict.insert("NeedAppearances".to_string(), Object::Boolean(need));
        }

        if let Some(flags) = self.sig_flags {
            dict.insert("SigFlags".to_string(), Object::Integer(flags as i64));
        }

        if let Some(da) = &self.default_appearance {
            dict.insert("DA".to_string(), Object::String(da.as_bytes().to_vec()));
        }

        if self.default_resources {
            dict.insert("DR".to_string(), Object::Dictionary(Self::build_default_resources()));
        }

        if !self.calc_order.is_empty() {
            let co = self.calc_order.iter().copied().map(Object::Reference).collect();
            dict.insert("CO".to_string(), Object::Array(co));
        }

        dict
    }

    /// Default resources with the Helvetica and ZapfDingbats form fonts.
    pub fn build_default_resources() -> Dictionary {
        let font = |base_font: &str| {
            let mut font = Dictionary::new();
            font.insert("Type".to_string(), Object::Name("Font".to_string()));
            font.insert("Subtype".to_string(), Object::Name("Type1".to_string()));
            font.insert("BaseFont".to_string(), Object::Name(base_font.to_string()));
            Object::Dictionary(font)
        };

        let mut fonts = Dictionary::new();
        fonts.insert("Helv".to_string(), font("Helvetica"));
        fonts.insert("ZaDb".to_string(), font("ZapfDingbats"));

        let mut dr = Dictionary::new();
        dr.insert("Font".to_string(), Object::Dictionary(fonts));
        dr
    }
}
