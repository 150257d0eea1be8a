//! Site publishing service - the primary use case.
//!
//! Loads a record, composes the page, optionally replays viewport events,
//! renders markup and writes it out.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, LoadWarning, PageRenderer, RecordSource},
    },
    domain::{
        DomainError, Page, PageComposer, PageOptions, ResumeRecord, SectionId, ViewSession,
        ViewSettings, ViewState, ViewTransition,
    },
    error::FolioResult,
};

/// A composed page together with everything found wrong on the way.
#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub record: ResumeRecord,
    pub page: Page,
    /// Record sections replaced by defaults while loading.
    pub warnings: Vec<LoadWarning>,
    /// Record invariant violations.
    pub problems: Vec<DomainError>,
}

impl ComposedPage {
    /// Human-readable list of every issue, for strict mode and `check`.
    pub fn issues(&self) -> Vec<String> {
        let mut issues: Vec<String> = self
            .warnings
            .iter()
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();
        issues.extend(self.problems.iter().map(ToString::to_string));
        issues.extend(
            self.page
                .diagnostics()
                .into_iter()
                .map(|(id, reason)| format!("section {id} omitted: {reason}")),
        );
        issues
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.problems.is_empty() && self.page.is_complete()
    }
}

/// Everything `publish` needs to know.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub record: PathBuf,
    pub output_dir: PathBuf,
    pub file_name: String,
    /// Event script to replay before rendering. Without one the page is
    /// rendered fully revealed and unscrolled.
    pub events: Option<PathBuf>,
    pub settings: ViewSettings,
    pub strict: bool,
    pub overwrite: bool,
    pub dry_run: bool,
}

impl PublishRequest {
    pub fn new(record: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            record: record.into(),
            output_dir: output_dir.into(),
            file_name: "index.html".into(),
            events: None,
            settings: ViewSettings::default(),
            strict: false,
            overwrite: false,
            dry_run: false,
        }
    }

    pub fn target(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

/// What `publish` did.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub path: PathBuf,
    pub bytes: usize,
    pub rendered: Vec<SectionId>,
    pub omitted: Vec<SectionId>,
    pub warnings: Vec<LoadWarning>,
    pub transitions: Vec<ViewTransition>,
    pub written: bool,
    /// The markup itself, kept for `--stdout` and dry runs.
    pub html: String,
}

/// Application service that orchestrates site generation.
///
/// This is the primary entry point for the CLI.
pub struct SiteService {
    source: Box<dyn RecordSource>,
    renderer: Box<dyn PageRenderer>,
    filesystem: Box<dyn Filesystem>,
    composer: PageComposer,
}

impl SiteService {
    /// Create a new site service with the given adapters.
    pub fn new(
        source: Box<dyn RecordSource>,
        renderer: Box<dyn PageRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            renderer,
            filesystem,
            composer: PageComposer::default(),
        }
    }

    /// Replace the page options (title, certifications, copyright year).
    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.composer = PageComposer::new(options);
        self
    }

    /// Load a record and compose its page.
    #[instrument(skip(self), fields(record = %location.display()))]
    pub fn compose(&self, location: &Path) -> FolioResult<ComposedPage> {
        let loaded = self.source.load_record(location)?;
        for warning in &loaded.warnings {
            warn!(field = %warning.field, message = %warning.message, "record section dropped");
        }

        let problems = loaded.record.validate();
        for problem in &problems {
            warn!(%problem, "record problem");
        }

        let page = self.composer.compose(&loaded.record);
        Ok(ComposedPage {
            record: loaded.record,
            page,
            warnings: loaded.warnings,
            problems,
        })
    }

    /// Render a page in a given view state.
    pub fn render(&self, page: &Page, state: &ViewState) -> FolioResult<String> {
        self.renderer.render(page, state)
    }

    /// Mount the page, replay a script and return the resulting state and
    /// the transitions in order.
    #[instrument(skip(self, page, settings), fields(script = %script.display()))]
    pub fn simulate(
        &self,
        page: &Page,
        script: &Path,
        settings: ViewSettings,
    ) -> FolioResult<(ViewState, Vec<ViewTransition>)> {
        let script = self.source.load_script(script)?;
        let session = ViewSession::mount(page, settings);
        let transitions = session.replay(&script);
        debug!(
            events = script.events.len(),
            transitions = transitions.len(),
            "script replayed"
        );
        Ok((session.state(), transitions))
    }

    /// Compose, render and write the page.
    #[instrument(skip(self, request), fields(record = %request.record.display()))]
    pub fn publish(&self, request: &PublishRequest) -> FolioResult<PublishReport> {
        let composed = self.compose(&request.record)?;

        if request.strict && !composed.is_clean() {
            return Err(ApplicationError::StrictModeViolation {
                issues: composed.issues(),
            }
            .into());
        }

        let (state, transitions) = match &request.events {
            Some(script) => self.simulate(&composed.page, script, request.settings.clone())?,
            None => (
                ViewState::fully_revealed(composed.page.reveal_targets()),
                Vec::new(),
            ),
        };

        let html = self.render(&composed.page, &state)?;
        let path = request.target();

        if self.filesystem.exists(&path) && !request.overwrite {
            return Err(ApplicationError::OutputExists { path }.into());
        }

        let written = if request.dry_run {
            info!(path = %path.display(), "dry run, nothing written");
            false
        } else {
            self.filesystem.create_dir_all(&request.output_dir)?;
            self.filesystem.write_file(&path, &html)?;
            info!(path = %path.display(), bytes = html.len(), "page written");
            true
        };

        Ok(PublishReport {
            bytes: html.len(),
            rendered: composed.page.sections().map(|view| view.id()).collect(),
            omitted: composed
                .page
                .diagnostics()
                .into_iter()
                .map(|(id, _)| id)
                .collect(),
            warnings: composed.warnings,
            transitions,
            written,
            path,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{LoadedRecord, MockFilesystem, MockPageRenderer, MockRecordSource},
        domain::{EventScript, Job, NavStyle, Profile, RevealKey, ViewEvent},
        error::FolioError,
    };

    fn record() -> ResumeRecord {
        let mut record = ResumeRecord::with_profile(Profile {
            name: "Jordan Rivera".into(),
            role: "Senior Growth Lead".into(),
            tagline: "Growth, measured.".into(),
            email: "jordan@example.com".into(),
            phone: String::new(),
            location: String::new(),
            linkedin: String::new(),
        });
        record.experience = vec![Job {
            id: "acme".into(),
            role: "Lead".into(),
            company: "Acme".into(),
            period: "2022 - now".into(),
            achievements: vec!["Doubled activation".into()],
            tags: vec!["growth".into()],
        }];
        record
    }

    fn source_with(record: ResumeRecord) -> MockRecordSource {
        let mut source = MockRecordSource::new();
        source.expect_load_record().returning(move |_| {
            Ok(LoadedRecord {
                record: record.clone(),
                warnings: vec![],
            })
        });
        source
    }

    fn echo_renderer() -> MockPageRenderer {
        let mut renderer = MockPageRenderer::new();
        renderer
            .expect_render()
            .returning(|page, state| Ok(format!("{}|{}", page.title(), state.revealed.len())));
        renderer
    }

    #[test]
    fn publish_writes_fully_revealed_page() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|path| path == Path::new("site"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("site/index.html") && content.starts_with("Jordan Rivera · Growth Lead|")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = SiteService::new(
            Box::new(source_with(record())),
            Box::new(echo_renderer()),
            Box::new(fs),
        );
        let report = service
            .publish(&PublishRequest::new("resume.json", "site"))
            .unwrap();

        assert!(report.written);
        assert_eq!(report.rendered, SectionId::ORDER.to_vec());
        assert!(report.omitted.is_empty());
        // services, experience, experience[0], education, contact
        assert!(report.html.ends_with("|5"));
    }

    #[test]
    fn existing_output_without_overwrite_fails() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().never();

        let service = SiteService::new(
            Box::new(source_with(record())),
            Box::new(echo_renderer()),
            Box::new(fs),
        );
        let err = service
            .publish(&PublishRequest::new("resume.json", "site"))
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::Application(ApplicationError::OutputExists { .. })
        ));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let service = SiteService::new(
            Box::new(source_with(record())),
            Box::new(echo_renderer()),
            Box::new(fs),
        );
        let mut request = PublishRequest::new("resume.json", "site");
        request.dry_run = true;
        let report = service.publish(&request).unwrap();
        assert!(!report.written);
        assert!(report.bytes > 0);
    }

    #[test]
    fn strict_mode_rejects_omitted_sections() {
        let mut broken = record();
        broken.experience[0].achievements.clear();

        let service = SiteService::new(
            Box::new(source_with(broken)),
            Box::new(echo_renderer()),
            Box::new(MockFilesystem::new()),
        );
        let mut request = PublishRequest::new("resume.json", "site");
        request.strict = true;

        match service.publish(&request).unwrap_err() {
            FolioError::Application(ApplicationError::StrictModeViolation { issues }) => {
                assert!(issues.iter().any(|i| i.contains("section experience omitted")));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lenient_mode_renders_remaining_sections() {
        let mut broken = record();
        broken.experience[0].achievements.clear();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));

        let service = SiteService::new(
            Box::new(source_with(broken)),
            Box::new(echo_renderer()),
            Box::new(fs),
        );
        let report = service
            .publish(&PublishRequest::new("resume.json", "site"))
            .unwrap();
        assert_eq!(report.omitted, vec![SectionId::Experience]);
        assert_eq!(report.rendered.len(), 5);
    }

    #[test]
    fn event_script_drives_render_state() {
        let mut source = source_with(record());
        source.expect_load_script().returning(|_| {
            Ok(EventScript {
                events: vec![ViewEvent::Scroll(80.0)],
            })
        });

        let mut renderer = MockPageRenderer::new();
        renderer
            .expect_render()
            .withf(|_, state| state.nav_style() == NavStyle::Compact && state.revealed.is_empty())
            .returning(|_, _| Ok("<html/>".into()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));

        let service = SiteService::new(Box::new(source), Box::new(renderer), Box::new(fs));
        let mut request = PublishRequest::new("resume.json", "site");
        request.events = Some("events.json".into());

        let report = service.publish(&request).unwrap();
        assert_eq!(report.transitions, vec![ViewTransition::Scrolled(true)]);
    }

    #[test]
    fn simulate_reveals_in_stagger_order() {
        let mut source = source_with(record());
        source.expect_load_script().returning(|_| {
            Ok(serde_json::from_str(
                r#"{"events": [{"intersect": {"at_ms": 0, "entries": [
                    {"section": "experience", "item": 0, "ratio": 0.5},
                    {"section": "experience", "ratio": 0.5}
                ]}}]}"#,
            )
            .unwrap())
        });
        let service = SiteService::new(
            Box::new(source),
            Box::new(MockPageRenderer::new()),
            Box::new(MockFilesystem::new()),
        );

        let composed = service.compose(Path::new("resume.json")).unwrap();
        let (state, transitions) = service
            .simulate(&composed.page, Path::new("events.json"), ViewSettings::default())
            .unwrap();

        assert!(state.is_revealed(RevealKey::section(SectionId::Experience)));
        assert!(state.is_revealed(RevealKey::item(SectionId::Experience, 0)));
        assert_eq!(transitions.len(), 2);
    }

    #[test]
    fn load_failure_propagates() {
        let mut source = MockRecordSource::new();
        source.expect_load_record().returning(|path| {
            Err(ApplicationError::RecordNotFound {
                path: path.to_path_buf(),
            }
            .into())
        });
        let service = SiteService::new(
            Box::new(source),
            Box::new(MockPageRenderer::new()),
            Box::new(MockFilesystem::new()),
        );
        let err = service.compose(Path::new("missing.json")).unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::NotFound);
    }
}
