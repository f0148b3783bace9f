//! PDF/A conformance levels and the profile a document is opened with.

use bytes::Bytes;
use std::fmt;

/// PDF/A conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfALevel {
    /// PDF/A-1a: Full conformance with logical structure
    A1a,
    /// PDF/A-1b: Basic conformance (visual preservation)
    A1b,
    /// PDF/A-2a: PDF 1.7 based, full conformance
    A2a,
    /// PDF/A-2b: PDF 1.7 based, basic conformance
    A2b,
    /// PDF/A-2u: PDF/A-2b plus Unicode mapping
    A2u,
    /// PDF/A-3a: PDF/A-2a plus embedded files
    A3a,
    /// PDF/A-3b: PDF/A-2b plus embedded files
    A3b,
    /// PDF/A-3u: PDF/A-3b plus Unicode mapping
    A3u,
}

impl PdfALevel {
    /// All levels, in ISO part order.
    pub const ALL: [PdfALevel; 8] = [
        PdfALevel::A1a,
        PdfALevel::A1b,
        PdfALevel::A2a,
        PdfALevel::A2b,
        PdfALevel::A2u,
        PdfALevel::A3a,
        PdfALevel::A3b,
        PdfALevel::A3u,
    ];

    /// Get the PDF/A part (1, 2, or 3).
    pub fn part(&self) -> PdfAPart {
        match self {
            PdfALevel::A1a | PdfALevel::A1b => PdfAPart::Part1,
            PdfALevel::A2a | PdfALevel::A2b | PdfALevel::A2u => PdfAPart::Part2,
            PdfALevel::A3a | PdfALevel::A3b | PdfALevel::A3u => PdfAPart::Part3,
        }
    }

    /// Get the conformance level letter.
    pub fn conformance(&self) -> char {
        match self {
            PdfALevel::A1a | PdfALevel::A2a | PdfALevel::A3a => 'A',
            PdfALevel::A1b | PdfALevel::A2b | PdfALevel::A3b => 'B',
            PdfALevel::A2u | PdfALevel::A3u => 'U',
        }
    }

    /// PDF version written in the file header.
    ///
    /// PDF/A-1 is based on PDF 1.4, later parts on PDF 1.7.
    pub fn pdf_version(&self) -> &'static str {
        match self.part() {
            PdfAPart::Part1 => "1.4",
            PdfAPart::Part2 | PdfAPart::Part3 => "1.7",
        }
    }

    /// Get the XMP pdfaid:part value.
    pub fn xmp_part(&self) -> &'static str {
        match self.part() {
            PdfAPart::Part1 => "1",
            PdfAPart::Part2 => "2",
            PdfAPart::Part3 => "3",
        }
    }

    /// Get the XMP pdfaid:conformance value.
    pub fn xmp_conformance(&self) -> &'static str {
        match self.conformance() {
            'A' => "A",
            'U' => "U",
            _ => "B",
        }
    }

    /// Parse from XMP pdfaid:part and pdfaid:conformance values.
    pub fn from_xmp(part: &str, conformance: &str) -> Option<Self> {
        match (part, conformance.to_uppercase().as_str()) {
            ("1", "A") => Some(PdfALevel::A1a),
            ("1", "B") => Some(PdfALevel::A1b),
            ("2", "A") => Some(PdfALevel::A2a),
            ("2", "B") => Some(PdfALevel::A2b),
            ("2", "U") => Some(PdfALevel::A2u),
            ("3", "A") => Some(PdfALevel::A3a),
            ("3", "B") => Some(PdfALevel::A3b),
            ("3", "U") => Some(PdfALevel::A3u),
            _ => None,
        }
    }
}

impl fmt::Display for PdfALevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PdfALevel::A1a => "PDF/A-1a",
            PdfALevel::A1b => "PDF/A-1b",
            PdfALevel::A2a => "PDF/A-2a",
            PdfALevel::A2b => "PDF/A-2b",
            PdfALevel::A2u => "PDF/A-2u",
            PdfALevel::A3a => "PDF/A-3a",
            PdfALevel::A3b => "PDF/A-3b",
            PdfALevel::A3u => "PDF/A-3u",
        };
        write!(f, "{}", name)
    }
}

/// PDF/A part (version).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfAPart {
    /// PDF/A-1 (based on PDF 1.4)
    Part1,
    /// PDF/A-2 (based on PDF 1.7)
    Part2,
    /// PDF/A-3 (based on PDF 1.7, with embedded files)
    Part3,
}

impl fmt::Display for PdfAPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfAPart::Part1 => write!(f, "PDF/A-1"),
            PdfAPart::Part2 => write!(f, "PDF/A-2"),
            PdfAPart::Part3 => write!(f, "PDF/A-3"),
        }
    }
}

/// Output intent declaration: the ICC profile describing the intended output device.
///
/// Constructed from caller-supplied ICC data. The profile bytes are embedded as-is;
/// only the header's color space signature is read, to fill in the component count.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputIntent {
    output_condition_identifier: String,
    output_condition: String,
    registry_name: String,
    info: String,
    icc_profile: Bytes,
}

impl OutputIntent {
    /// Create an output intent.
    ///
    /// # Arguments
    ///
    /// * `output_condition_identifier` - Name of the output condition (e.g. `"Custom"`)
    /// * `output_condition` - Human readable condition, may be empty
    /// * `registry_name` - Registry URI (e.g. `"http://www.color.org"`)
    /// * `info` - Color space label (e.g. `"sRGB IEC61966-2.1"`)
    /// * `icc_profile` - ICC profile bytes
    pub fn new(
        output_condition_identifier: impl Into<String>,
        output_condition: impl Into<String>,
        registry_name: impl Into<String>,
        info: impl Into<String>,
        icc_profile: impl Into<Bytes>,
    ) -> Self {
        Self {
            output_condition_identifier: output_condition_identifier.into(),
            output_condition: output_condition.into(),
            registry_name: registry_name.into(),
            info: info.into(),
            icc_profile: icc_profile.into(),
        }
    }

    /// Output condition identifier.
    pub fn output_condition_identifier(&self) -> &str {
        &self.output_condition_identifier
    }

    /// Output condition.
    pub fn output_condition(&self) -> &str {
        &self.output_condition
    }

    /// Registry URI.
    pub fn registry_name(&self) -> &str {
        &self.registry_name
    }

    /// Color space label.
    pub fn info(&self) -> &str {
        &self.info
    }

    /// ICC profile bytes.
    pub fn icc_profile(&self) -> &Bytes {
        &self.icc_profile
    }

    /// Number of color components of the ICC profile.
    ///
    /// Read from the data color space signature at bytes 16..20 of the profile header.
    /// Unknown or truncated headers default to 3 (RGB).
    pub fn components(&self) -> i64 {
        match self.icc_profile.get(16..20) {
            Some(b"GRAY") => 1,
            Some(b"CMYK") => 4,
            Some(b"RGB ") => 3,
            _ => 3,
        }
    }
}

/// The conformance level and output intent a document is opened with.
///
/// Immutable: there is no way to change either after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceProfile {
    level: PdfALevel,
    output_intent: Option<OutputIntent>,
}

impl ConformanceProfile {
    /// Create a profile.
    pub fn new(level: PdfALevel, output_intent: OutputIntent) -> Self {
        Self {
            level,
            output_intent: Some(output_intent),
        }
    }

    /// Create a profile without an output intent.
    ///
    /// Such a profile cannot open a [`PdfADocument`](crate::document::PdfADocument), and
    /// fails the output intent rule.
    pub fn without_output_intent(level: PdfALevel) -> Self {
        Self {
            level,
            output_intent: None,
        }
    }

    /// The conformance level.
    pub fn level(&self) -> PdfALevel {
        self.level
    }

    /// The output intent, if any.
    pub fn output_intent(&self) -> Option<&OutputIntent> {
        self.output_intent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icc_header(signature: &[u8; 4]) -> Vec<u8> {
        let mut data = vec![0u8; 128];
        data[16..20].copy_from_slice(signature);
        data
    }

    #[test]
    fn test_pdf_a_level_properties() {
        assert_eq!(PdfALevel::A1a.part(), PdfAPart::Part1);
        assert_eq!(PdfALevel::A2b.part(), PdfAPart::Part2);
        assert_eq!(PdfALevel::A3u.part(), PdfAPart::Part3);
        assert_eq!(PdfALevel::A1b.conformance(), 'B');
        assert_eq!(PdfALevel::A2u.conformance(), 'U');
    }

    #[test]
    fn test_pdf_version() {
        assert_eq!(PdfALevel::A1b.pdf_version(), "1.4");
        assert_eq!(PdfALevel::A2b.pdf_version(), "1.7");
        assert_eq!(PdfALevel::A3a.pdf_version(), "1.7");
    }

    #[test]
    fn test_pdf_a_level_xmp() {
        assert_eq!(PdfALevel::A1b.xmp_part(), "1");
        assert_eq!(PdfALevel::A1b.xmp_conformance(), "B");
        assert_eq!(PdfALevel::A2u.xmp_conformance(), "U");
        assert_eq!(PdfALevel::A3a.xmp_conformance(), "A");
    }

    #[test]
    fn test_pdf_a_level_from_xmp() {
        assert_eq!(PdfALevel::from_xmp("1", "A"), Some(PdfALevel::A1a));
        assert_eq!(PdfALevel::from_xmp("2", "b"), Some(PdfALevel::A2b));
        assert_eq!(PdfALevel::from_xmp("3", "U"), Some(PdfALevel::A3u));
        assert_eq!(PdfALevel::from_xmp("1", "U"), None);
        assert_eq!(PdfALevel::from_xmp("4", "A"), None);
    }

    #[test]
    fn test_xmp_round_trip_for_all_levels() {
        for level in PdfALevel::ALL {
            assert_eq!(
                PdfALevel::from_xmp(level.xmp_part(), level.xmp_conformance()),
                Some(level)
            );
        }
    }

    #[test]
    fn test_pdf_a_level_display() {
        assert_eq!(format!("{}", PdfALevel::A1b), "PDF/A-1b");
        assert_eq!(format!("{}", PdfALevel::A2u), "PDF/A-2u");
        assert_eq!(format!("{}", PdfAPart::Part3), "PDF/A-3");
    }

    #[test]
    fn test_output_intent_components() {
        let rgb = OutputIntent::new("Custom", "", "http://www.color.org", "sRGB", icc_header(b"RGB "));
        let gray = OutputIntent::new("Custom", "", "", "Gray", icc_header(b"GRAY"));
        let cmyk = OutputIntent::new("Custom", "", "", "CMYK", icc_header(b"CMYK"));
        let short = OutputIntent::new("Custom", "", "", "?", vec![0u8; 4]);
        assert_eq!(rgb.components(), 3);
        assert_eq!(gray.components(), 1);
        assert_eq!(cmyk.components(), 4);
        assert_eq!(short.components(), 3);
    }

    #[test]
    fn test_profile_accessors() {
        let intent = OutputIntent::new(
            "Custom",
            "",
            "http://www.color.org",
            "sRGB IEC61966-2.1",
            icc_header(b"RGB "),
        );
        let profile = ConformanceProfile::new(PdfALevel::A2b, intent.clone());
        assert_eq!(profile.level(), PdfALevel::A2b);
        assert_eq!(profile.output_intent(), Some(&intent));
        assert_eq!(intent.registry_name(), "http://www.color.org");

        let bare = ConformanceProfile::without_output_intent(PdfALevel::A1b);
        assert!(bare.output_intent().is_none());
    }
}
