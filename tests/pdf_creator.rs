// tests/pdf_creator.rs

#![cfg(unix)]

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use pdfgate::config::RendererConfig;
use pdfgate::errors::PdfGenerationFailed;
use pdfgate::export::{BufferedResponse, ExportRequest, PDF_CONTENT_TYPE, PdfCreator, ResponseSink};
use pdfgate_test_utils::fake_renderer::{FakeRenderer, wait_for_exit};
use pdfgate_test_utils::init_tracing;
use pdfgate_test_utils::logs::CapturedLogs;
use pdfgate_test_utils::sinks::FailingSink;
use pdfgate_test_utils::with_timeout;

const RELEASE_GRACE: Duration = Duration::from_secs(3);

const PDF_BYTES: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

fn creator_for(renderer: &FakeRenderer) -> PdfCreator {
    PdfCreator::new(RendererConfig::new(renderer.path()))
}

fn report_request() -> ExportRequest {
    ExportRequest::new("http://x/doc.html", "report.pdf")
}

#[tokio::test]
async fn successful_render_streams_bytes_then_sets_headers() {
    init_tracing();

    let renderer = FakeRenderer::builder().stdout(PDF_BYTES).build();
    let creator = creator_for(&renderer);
    let mut sink = BufferedResponse::new();

    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Ok(()));
    assert_eq!(sink.body_bytes(), PDF_BYTES);
    assert_eq!(sink.content_type(), Some(PDF_CONTENT_TYPE));
    assert_eq!(
        sink.content_disposition(),
        Some("attachment; filename=\"report.pdf\"")
    );
}

#[tokio::test]
async fn renderer_receives_fixed_argument_template() {
    init_tracing();

    let renderer = FakeRenderer::builder().stdout(PDF_BYTES).build();
    let creator = creator_for(&renderer);
    let mut sink = BufferedResponse::new();

    with_timeout(creator.create(&report_request(), &mut sink))
        .await
        .expect("render should succeed");

    assert_eq!(
        renderer.recorded_args(),
        vec![
            "--margin-left",
            "0mm",
            "--margin-right",
            "0mm",
            "--margin-bottom",
            "0mm",
            "--margin-top",
            "0mm",
            "http://x/doc.html",
            "-",
        ]
    );
}

#[tokio::test]
async fn large_output_is_relayed_without_deadlock() {
    init_tracing();

    // Well beyond a pipe buffer, so the renderer blocks unless we drain it.
    let payload: Vec<u8> = (0..512 * 1024).map(|i| (i % 251) as u8).collect();
    let renderer = FakeRenderer::builder().stdout(payload.clone()).build();
    let creator = creator_for(&renderer);
    let mut sink = BufferedResponse::new();

    with_timeout(creator.create(&report_request(), &mut sink))
        .await
        .expect("render should succeed");

    assert_eq!(sink.body_bytes().len(), payload.len());
    assert_eq!(sink.body_bytes(), payload.as_slice());
}

#[tokio::test]
async fn empty_output_with_zero_exit_is_still_a_success() {
    init_tracing();

    let renderer = FakeRenderer::builder().build();
    let creator = creator_for(&renderer);
    let mut sink = BufferedResponse::new();

    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Ok(()));
    assert!(sink.body_bytes().is_empty());
    assert_eq!(sink.content_type(), Some(PDF_CONTENT_TYPE));
}

#[tokio::test]
async fn file_name_is_used_verbatim_in_content_disposition() {
    init_tracing();

    let renderer = FakeRenderer::builder().stdout(PDF_BYTES).build();
    let creator = creator_for(&renderer);
    let mut sink = BufferedResponse::new();
    let request = ExportRequest::new("http://x/doc.html", "Q3 \"final\" report.pdf");

    with_timeout(creator.create(&request, &mut sink))
        .await
        .expect("render should succeed");

    assert_eq!(
        sink.content_disposition(),
        Some("attachment; filename=\"Q3 \"final\" report.pdf\"")
    );
}

#[tokio::test]
async fn non_zero_exit_fails_without_headers_and_logs_diagnostics() {
    let (logs, _guard) = CapturedLogs::install();

    let renderer = FakeRenderer::builder()
        .stdout(b"%PDF-1.4 partial".to_vec())
        .stderr("network timeout")
        .exit_code(1)
        .build();
    let creator = creator_for(&renderer);
    let mut sink = BufferedResponse::new();

    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    assert_eq!(sink.content_type(), None);
    assert_eq!(sink.content_disposition(), None);

    let text = logs.contents();
    assert!(text.contains("Could not create PDF"), "logs: {text}");
    assert!(text.contains("exit_code=Some(1)"), "logs: {text}");
    assert!(text.contains("network timeout"), "logs: {text}");
}

#[tokio::test]
async fn missing_executable_fails_and_writes_nothing() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let creator = PdfCreator::new(RendererConfig::new(dir.path().join("no-such-renderer")));
    let mut sink = BufferedResponse::new();

    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    assert!(sink.body_bytes().is_empty());
    assert_eq!(sink.content_type(), None);
}

#[tokio::test]
async fn broken_sink_fails_as_generic_error_without_headers() {
    init_tracing();

    let payload = vec![b'x'; 64 * 1024];
    let renderer = FakeRenderer::builder().stdout(payload).build();
    let creator = creator_for(&renderer);
    let mut sink = FailingSink::after(16);

    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    assert_eq!(sink.writer.written.len(), 16);
    assert_eq!(sink.content_type, None);
    assert_eq!(sink.content_disposition, None);
}

#[tokio::test]
async fn renderer_outliving_wait_timeout_does_not_block() {
    init_tracing();

    let renderer = FakeRenderer::builder().stdout(PDF_BYTES).linger(30).build();
    let creator = PdfCreator::new(
        RendererConfig::new(renderer.path()).with_wait_timeout(Duration::from_millis(200)),
    );
    let mut sink = BufferedResponse::new();

    let started = Instant::now();
    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(sink.body_bytes(), PDF_BYTES);
    assert_eq!(sink.content_type(), None);

    let pid = renderer.recorded_pid().expect("renderer wrote its pid");
    assert!(
        wait_for_exit(pid, RELEASE_GRACE).await,
        "renderer {pid} still running after create returned"
    );
}

#[tokio::test]
async fn cancellation_cuts_the_wait_short_and_stays_flagged() {
    init_tracing();

    let renderer = FakeRenderer::builder().stdout(PDF_BYTES).linger(30).build();
    let creator = PdfCreator::new(
        RendererConfig::new(renderer.path()).with_wait_timeout(Duration::from_secs(20)),
    );
    let mut sink = BufferedResponse::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let started = Instant::now();
    let result = with_timeout(creator.create_with_cancel(&report_request(), &mut sink, &cancel)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(cancel.is_cancelled());
    assert_eq!(sink.body_bytes(), PDF_BYTES);

    let pid = renderer.recorded_pid().expect("renderer wrote its pid");
    assert!(
        wait_for_exit(pid, RELEASE_GRACE).await,
        "renderer {pid} still running after create returned"
    );
}

#[tokio::test]
async fn broken_sink_releases_a_still_running_renderer() {
    init_tracing();

    let renderer = FakeRenderer::builder()
        .stdout(vec![b'x'; 64 * 1024])
        .linger(30)
        .build();
    let creator = creator_for(&renderer);
    let mut sink = FailingSink::after(16);

    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    let pid = renderer.recorded_pid().expect("renderer wrote its pid");
    assert!(
        wait_for_exit(pid, RELEASE_GRACE).await,
        "renderer {pid} still running after create returned"
    );
}

#[tokio::test]
async fn stderr_held_open_by_a_grandchild_delays_failure_only_briefly() {
    init_tracing();

    let renderer = FakeRenderer::builder()
        .stdout(PDF_BYTES)
        .stderr("still loading")
        .hold_stderr()
        .linger(30)
        .build();
    let creator = PdfCreator::new(
        RendererConfig::new(renderer.path()).with_wait_timeout(Duration::from_secs(4)),
    );
    let mut sink = BufferedResponse::new();

    let started = Instant::now();
    let result = with_timeout(creator.create(&report_request(), &mut sink)).await;

    assert_eq!(result, Err(PdfGenerationFailed));
    // Wait timeout plus the fixed stderr drain budget, not twice the timeout.
    assert!(
        started.elapsed() < Duration::from_secs(7),
        "failure took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn creator_accepts_trait_object_sinks() {
    init_tracing();

    let renderer = FakeRenderer::builder().stdout(PDF_BYTES).build();
    let creator = creator_for(&renderer);
    let mut buffered = BufferedResponse::new();
    let sink: &mut dyn ResponseSink = &mut buffered;

    with_timeout(creator.create(&report_request(), sink))
        .await
        .expect("render should succeed");

    assert_eq!(buffered.body_bytes(), PDF_BYTES);
}
