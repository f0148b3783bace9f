//! Output intent objects.
//!
//! A PDF/A output intent is a `/Type /OutputIntent` dictionary with subtype
//! `/GTS_PDFA1` whose `/DestOutputProfile` is an embedded ICC profile stream
//! (ISO 32000-1:2008, Section 14.11.5).

use super::pdf_writer::compress_data;
use crate::compliance::rules::PDFA_OUTPUT_INTENT_SUBTYPE;
use crate::compliance::OutputIntent;
use crate::object::{Dictionary, Object, ObjectRef};
use bytes::Bytes;

/// Build the ICC profile stream with its component count.
pub fn build_icc_stream(intent: &OutputIntent, compress: bool) -> std::io::Result<Object> {
    let mut dict = Dictionary::new();
    dict.insert("N".to_string(), Object::Integer(intent.components()));

    let data = if compress {
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        Bytes::from(compress_data(intent.icc_profile())?)
    } else {
        intent.icc_profile().clone()
    };

    Ok(Object::Stream { dict, data })
}

/// Build the output intent dictionary referencing an ICC profile stream.
///
/// Empty text fields are left out.
pub fn build_output_intent(intent: &OutputIntent, icc_ref: ObjectRef) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.insert("Type".to_string(), Object::Name("OutputIntent".to_string()));
    dict.insert("S".to_string(), Object::Name(PDFA_OUTPUT_INTENT_SUBTYPE.to_string()));
    dict.insert(
        "OutputConditionIdentifier".to_string(),
        Object::String(intent.output_condition_identifier().as_bytes().to_vec()),
    );
    dict.insert("DestOutputProfile".to_string(), Object::Reference(icc_ref));

    for (key, value) in [
        ("OutputCondition", intent.output_condition()),
        ("RegistryName", intent.registry_name()),
        ("Info", intent.info()),
    ] {
        if !value.is_empty() {
            dict.insert(key.to_string(), Object::String(value.as_bytes().to_vec()));
        }
    }

    dict
}
