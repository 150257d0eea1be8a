//! Full pipeline tests: JSON on disk -> composed page -> HTML on disk.

use std::fs;
use std::path::Path;

use folio_adapters::{
    HtmlRenderer, JsonRecordSource, LocalFilesystem, MemoryFilesystem, sample::SAMPLE_RECORD,
};
use folio_core::{
    application::{ApplicationError, PublishRequest, SiteService, ports::Filesystem},
    domain::{SectionId, ViewSession, ViewSettings, ViewTransition},
    error::FolioError,
};

fn local_service() -> SiteService {
    SiteService::new(
        Box::new(JsonRecordSource::new()),
        Box::new(HtmlRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("resume.json");
    fs::write(&path, SAMPLE_RECORD).unwrap();
    path
}

#[test]
fn renders_sample_to_index_html() {
    let dir = tempfile::tempdir().unwrap();
    let record = write_sample(dir.path());
    let out = dir.path().join("site");

    let report = local_service()
        .publish(&PublishRequest::new(&record, &out))
        .unwrap();

    assert!(report.written);
    assert_eq!(report.rendered, SectionId::ORDER.to_vec());

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains(r#"I'm <span class="accent">Jordan</span>,<br>Growth Lead</h1>"#));
    for anchor in ["home", "services", "experience", "contact"] {
        assert!(html.contains(&format!(r#"id="{anchor}""#)), "missing #{anchor}");
    }
}

#[test]
fn timeline_lists_four_jobs_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let record = write_sample(dir.path());
    let mut request = PublishRequest::new(&record, dir.path());
    request.dry_run = true;

    let html = local_service().publish(&request).unwrap().html;

    let positions: Vec<usize> = ["northwind", "contoso", "fabrikam", "tailspin"]
        .iter()
        .map(|id| html.find(&format!(r#"data-job="{id}""#)).unwrap())
        .collect();
    assert_eq!(positions.len(), 4);
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(html.matches(r#"class="timeline__item""#).count(), 4);

    assert!(html.contains("&quot;Lifted trial-to-paid conversion by 9% across 25 markets&quot;"));
    assert!(!html.contains("Built the experimentation platform"));
    for tag in ["Experimentation", "Pricing", "B2B SaaS"] {
        assert!(html.contains(&format!(r#"<span class="tag">{tag}</span>"#)));
    }
}

#[test]
fn dry_run_leaves_disk_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let record = write_sample(dir.path());
    let out = dir.path().join("site");
    let mut request = PublishRequest::new(&record, &out);
    request.dry_run = true;

    let report = local_service().publish(&request).unwrap();
    assert!(!report.written);
    assert!(!out.exists());
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let record = write_sample(dir.path());
    fs::write(dir.path().join("index.html"), "old").unwrap();

    let mut request = PublishRequest::new(&record, dir.path());
    let err = local_service().publish(&request).unwrap_err();
    assert!(matches!(
        err,
        FolioError::Application(ApplicationError::OutputExists { .. })
    ));
    assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), "old");

    request.overwrite = true;
    local_service().publish(&request).unwrap();
    assert_ne!(fs::read_to_string(dir.path().join("index.html")).unwrap(), "old");
}

#[test]
fn event_script_is_replayed_before_render() {
    let memory = MemoryFilesystem::new()
        .with_file("resume.json", SAMPLE_RECORD)
        .with_file(
            "events.json",
            r#"{"events": [
                {"scroll": 20.0},
                {"scroll": 51.0},
                {"intersect": {"at_ms": 1000, "entries": [
                    {"section": "services", "ratio": 0.3},
                    {"section": "services", "item": 0, "ratio": 0.3},
                    {"section": "services", "item": 1, "ratio": 0.3}
                ]}}
            ]}"#,
        );
    let service = SiteService::new(
        Box::new(JsonRecordSource::with_filesystem(memory.clone())),
        Box::new(HtmlRenderer::new()),
        Box::new(memory.clone()),
    );

    let mut request = PublishRequest::new("resume.json", "out");
    request.events = Some("events.json".into());
    let report = service.publish(&request).unwrap();

    assert_eq!(report.transitions[0], ViewTransition::Scrolled(true));
    let starts: Vec<u128> = report.transitions[1..]
        .iter()
        .map(|t| match t {
            ViewTransition::Revealed(event) => event.start.as_millis(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(starts, vec![1000, 1000, 1200]);

    let html = report.html;
    assert!(html.contains(r#"class="nav nav--compact""#));
    assert!(html.contains(r#"class="card reveal is-visible" data-reveal="services[1]""#));
    assert!(html.contains(r#"class="card reveal" data-reveal="services[2]""#));
    assert!(memory.exists(Path::new("out/index.html")));
}

#[test]
fn held_item_renders_with_latched_delay() {
    let memory = MemoryFilesystem::new()
        .with_file("resume.json", SAMPLE_RECORD)
        .with_file(
            "events.json",
            r#"{"events": [
                {"intersect": {"at_ms": 0, "entries": [
                    {"section": "services", "item": 1, "ratio": 0.3}
                ]}},
                {"intersect": {"at_ms": 1000, "entries": [
                    {"section": "services", "item": 0, "ratio": 0.3}
                ]}}
            ]}"#,
        );
    let service = SiteService::new(
        Box::new(JsonRecordSource::with_filesystem(memory.clone())),
        Box::new(HtmlRenderer::new()),
        Box::new(memory.clone()),
    );

    let mut request = PublishRequest::new("resume.json", "out");
    request.events = Some("events.json".into());
    let report = service.publish(&request).unwrap();

    let revealed: Vec<String> = report
        .transitions
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        revealed,
        [
            "services[0] revealed (starts at 1000ms)",
            "services[1] revealed (starts at 1000ms)",
        ]
    );
    // Released together with its predecessor, so no nominal 200ms delay.
    assert!(report.html.contains(r#"class="card reveal is-visible" data-reveal="services[1]">"#));
}

#[test]
fn view_session_over_sample_page() {
    let service = SiteService::new(
        Box::new(JsonRecordSource::with_filesystem(
            MemoryFilesystem::new().with_file("resume.json", SAMPLE_RECORD),
        )),
        Box::new(HtmlRenderer::new()),
        Box::new(MemoryFilesystem::new()),
    );
    let composed = service.compose(Path::new("resume.json")).unwrap();
    assert!(composed.is_clean());

    let session = ViewSession::mount(&composed.page, ViewSettings::default());
    // services + 3 cards, experience + 4 entries, education, contact
    assert_eq!(session.observed_targets(), 11);
    assert!(session.state().revealed.is_empty());
}
