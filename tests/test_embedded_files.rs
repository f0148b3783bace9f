//! Tests for embedded files (file attachments) functionality.

use chrono::{TimeZone, Utc};
use pdfa_guard::compliance::{
    ConformanceProfile, EmbeddedFilesRule, FileSpecSource, OutputIntent, PdfALevel,
    PdfAValidator,
};
use pdfa_guard::document::PdfADocument;
use pdfa_guard::graph::ObjectGraph;
use pdfa_guard::object::{Dictionary, Object};
use pdfa_guard::writer::{AFRelationship, FileAttachment, ObjectSerializer, PdfWriterConfig};

fn intent() -> OutputIntent {
    let mut icc = vec![0u8; 128];
    icc[16..20].copy_from_slice(b"RGB ");
    OutputIntent::new("Custom", "", "http://www.color.org", "sRGB IEC61966-2.1", icc)
}

fn open(level: PdfALevel) -> PdfADocument<Vec<u8>> {
    let _ = env_logger::builder().is_test(true).try_init();
    PdfADocument::new(Vec::new(), level, intent()).expect("open document")
}

mod file_attachment_struct {
    use super::*;

    #[test]
    fn test_file_attachment_new() {
        let file = FileAttachment::new("test.txt", b"Hello, World!".to_vec(), "text/plain");
        assert_eq!(file.file_name, "test.txt");
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.size(), 13);
        assert!(file.description.is_none());
        assert!(file.af_relationship.is_none());
    }

    #[test]
    fn test_file_attachment_builder() {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let file = FileAttachment::new("data.csv", b"a,b,c".to_vec(), "text/csv")
            .with_description("Test CSV file")
            .with_creation_date(created)
            .with_modification_date(created)
            .with_af_relationship(AFRelationship::Data);

        assert_eq!(file.description, Some("Test CSV file".to_string()));
        assert_eq!(file.creation_date, Some(created));
        assert_eq!(file.af_relationship, Some(AFRelationship::Data));
    }

    #[test]
    fn test_af_relationship_pdf_name() {
        assert_eq!(AFRelationship::Source.pdf_name(), "Source");
        assert_eq!(AFRelationship::Data.pdf_name(), "Data");
        assert_eq!(AFRelationship::Alternative.pdf_name(), "Alternative");
        assert_eq!(AFRelationship::Supplement.pdf_name(), "Supplement");
        assert_eq!(AFRelationship::EncryptedPayload.pdf_name(), "EncryptedPayload");
        assert_eq!(AFRelationship::FormData.pdf_name(), "FormData");
        assert_eq!(AFRelationship::Schema.pdf_name(), "Schema");
        assert_eq!(AFRelationship::Unspecified.pdf_name(), "Unspecified");
    }
}

mod document_structure {
    use super::*;

    #[test]
    fn test_name_tree_sorted_by_file_name() {
        let mut doc = open(PdfALevel::A2b);
        let zulu = doc
            .add_file_attachment(FileAttachment::new("zulu.pdf", Vec::new(), "application/pdf"))
            .unwrap();
        let alpha = doc
            .add_file_attachment(FileAttachment::new("alpha.pdf", Vec::new(), "application/pdf"))
            .unwrap();

        let names = doc
            .graph()
            .catalog_entry("Names")
            .and_then(Object::as_dict)
            .and_then(|names| names.get("EmbeddedFiles"))
            .and_then(Object::as_dict)
            .and_then(|tree| tree.get("Names"))
            .and_then(Object::as_array)
            .unwrap();

        assert_eq!(names.len(), 4);
        assert_eq!(names[0].as_string(), Some(&b"alpha.pdf"[..]));
        assert_eq!(names[1].as_reference(), Some(alpha));
        assert_eq!(names[2].as_string(), Some(&b"zulu.pdf"[..]));
        assert_eq!(names[3].as_reference(), Some(zulu));
    }

    #[test]
    fn test_file_specifications_found_in_tree_and_pages() {
        let mut doc = open(PdfALevel::A3b);
        doc.add_new_page().unwrap();
        doc.add_file_attachment(FileAttachment::new("doc.pdf", Vec::new(), "application/pdf"))
            .unwrap();
        doc.attach_file_to_page(
            0,
            [10.0, 10.0, 30.0, 30.0],
            FileAttachment::new("img.png", Vec::new(), "image/png"),
        )
        .unwrap();

        let specs = EmbeddedFilesRule::file_specifications(doc.graph());
        let sources: Vec<FileSpecSource> = specs.iter().map(|(source, _)| *source).collect();
        assert_eq!(
            sources,
            vec![
                FileSpecSource::EmbeddedFilesTree,
                FileSpecSource::PageAnnotation { page_index: 0 }
            ]
        );
    }

    #[test]
    fn test_page_annotation_entries() {
        let mut doc = open(PdfALevel::A2b);
        doc.add_new_page().unwrap();
        let annot = doc
            .attach_file_to_page(
                0,
                [72.0, 700.0, 92.0, 720.0],
                FileAttachment::new("other.pdf", Vec::new(), "application/pdf")
                    .with_description("Attached report"),
            )
            .unwrap();

        let annot = doc.graph().object(annot).and_then(Object::as_dict).unwrap();
        assert_eq!(annot.get("Subtype").and_then(Object::as_name), Some("FileAttachment"));
        assert_eq!(annot.get("F").and_then(Object::as_integer), Some(4));
        assert_eq!(
            annot.get("Contents").and_then(Object::as_string),
            Some(&b"Attached report"[..])
        );
        assert!(!annot.contains_key("AF"));

        let page = doc.graph().pages()[0];
        assert_eq!(page.get("Annots").and_then(Object::as_array).map(Vec::len), Some(1));
    }
}

mod serialized_output {
    use super::*;

    #[test]
    fn test_mime_type_written_as_escaped_name() {
        let mut doc = open(PdfALevel::A2b);
        doc.add_new_page().unwrap();
        doc.add_file_attachment(FileAttachment::new("doc.pdf", b"payload".to_vec(), "application/pdf"))
            .unwrap();
        let bytes = doc.close().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Subtype /application#2Fpdf"));
        assert!(text.contains("/Type /EmbeddedFile"));
        assert!(text.contains("/Type /Filespec"));
        assert!(text.contains("(doc.pdf)"));
        assert!(text.contains("payload"));
    }

    #[test]
    fn test_duplicate_file_names_get_unique_keys() {
        let mut doc = open(PdfALevel::A2b);
        doc.add_file_attachment(FileAttachment::new("a.pdf", b"one".to_vec(), "application/pdf"))
            .unwrap();
        doc.add_file_attachment(FileAttachment::new("a.pdf", b"two".to_vec(), "application/pdf"))
            .unwrap();
        let bytes = doc.close().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("[(a.pdf) "));
        assert!(!text.contains(" R (a.pdf) "));
        assert_eq!(text.matches("(a.pdf \\(2\\)) ").count(), 1);
    }

    #[test]
    fn test_other_name_trees_survive_attachment() {
        let mut doc = open(PdfALevel::A2b);
        let mut dests = Dictionary::new();
        dests.insert("Names".into(), Object::Array(Vec::new()));
        let mut names = Dictionary::new();
        names.insert("Dests".into(), Object::Dictionary(dests));
        let names_ref = doc.graph_mut().objects_mut().add(Object::Dictionary(names));
        doc.catalog_mut()
            .insert("Names".into(), Object::Reference(names_ref));

        doc.add_file_attachment(FileAttachment::new("doc.pdf", Vec::new(), "application/pdf"))
            .unwrap();

        let names = doc.graph().object(names_ref).and_then(Object::as_dict).unwrap();
        let mut keys: Vec<&str> = names.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["Dests", "EmbeddedFiles"]);
        assert!(doc.close().is_ok());
    }

    #[test]
    fn test_compressed_attachment() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut doc = PdfADocument::with_config(
            Vec::new(),
            ConformanceProfile::new(PdfALevel::A3b, intent()),
            PdfWriterConfig::default().with_compress(true),
            PdfAValidator::new(),
        )
        .unwrap();
        let payload = "<row>value</row>".repeat(200);
        doc.add_file_attachment(
            FileAttachment::new("rows.xml", payload.clone().into_bytes(), "application/xml")
                .with_af_relationship(AFRelationship::Data),
        )
        .unwrap();
        let bytes = doc.close().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Filter /FlateDecode"));
        assert!(text.contains(&format!("/Size {}", payload.len())));
        assert!(!text.contains(&payload));
        assert!(text.contains("/AFRelationship /Data"));
    }

    #[test]
    fn test_rect_helper_matches_annotation_rect() {
        let rect = ObjectSerializer::rect(72.0, 700.0, 20.0, 20.0);
        assert_eq!(
            ObjectSerializer::compact().serialize_to_string(&rect),
            "[72 700 92 720]"
        );
    }
}
