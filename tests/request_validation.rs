// tests/request_validation.rs

use pdfgate::errors::RequestError;
use pdfgate::export::{ExportRequest, PdfFileRequest};

fn parse(json: &str) -> PdfFileRequest {
    serde_json::from_str(json).expect("valid request JSON")
}

#[test]
fn accepts_source_html_url_and_file_name() {
    let req = parse(r#"{"sourceHtmlUrl": "http://x/doc.html", "fileName": "report.pdf"}"#);

    assert_eq!(
        req.into_export_request(),
        Ok(ExportRequest::new("http://x/doc.html", "report.pdf"))
    );
}

#[test]
fn accepts_source_url_alias() {
    let req = parse(r#"{"sourceUrl": "https://example.com/", "fileName": "a.pdf"}"#);

    let export = req.into_export_request().unwrap();
    assert_eq!(export.source_url, "https://example.com/");
}

#[test]
fn rejects_blank_source_url() {
    let req = parse(r#"{"sourceHtmlUrl": "   ", "fileName": "a.pdf"}"#);

    assert_eq!(req.into_export_request(), Err(RequestError::EmptySourceUrl));
}

#[test]
fn rejects_relative_source_url() {
    let req = parse(r#"{"sourceHtmlUrl": "/doc.html", "fileName": "a.pdf"}"#);

    match req.into_export_request() {
        Err(RequestError::InvalidSourceUrl(_)) => {}
        other => panic!("Expected InvalidSourceUrl, got: {:?}", other),
    }
}

#[test]
fn rejects_empty_file_name() {
    let req = parse(r#"{"sourceHtmlUrl": "http://x/doc.html", "fileName": ""}"#);

    assert_eq!(req.into_export_request(), Err(RequestError::EmptyFileName));
}

#[test]
fn file_name_is_not_sanitized() {
    let req = parse(r#"{"sourceHtmlUrl": "http://x/doc.html", "fileName": "../we ird\".pdf"}"#);

    let export = req.into_export_request().unwrap();
    assert_eq!(export.file_name, "../we ird\".pdf");
}

#[test]
fn display_names_both_fields() {
    let req = ExportRequest::new("http://x/doc.html", "report.pdf");

    let shown = req.to_string();
    assert!(shown.contains("http://x/doc.html"));
    assert!(shown.contains("report.pdf"));
}
