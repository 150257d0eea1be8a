use tracing::{debug, instrument, warn};

use crate::domain::{
    error::DomainError,
    formatter,
    page::{
        Page, SectionId, SectionSlot, SectionView,
        sections::{
            ContactView, EducationView, HeroView, NavigationView, ServicesView, TimelineView,
        },
    },
    record::ResumeRecord,
};

/// Per-page switches that are not part of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub show_certifications: bool,
    pub copyright_year: Option<i32>,
    /// Overrides the `<title>`; defaults to "Name · Role".
    pub title: Option<String>,
}

/// Binds a record to the six sections in their fixed order.
#[derive(Debug, Clone, Default)]
pub struct PageComposer {
    options: PageOptions,
}

impl PageComposer {
    pub fn new(options: PageOptions) -> Self {
        Self { options }
    }

    /// Compose the page. Never fails: a section whose data cannot be bound
    /// is recorded as omitted and the remaining sections still render.
    #[instrument(skip_all, fields(name = %record.profile.name))]
    pub fn compose(&self, record: &ResumeRecord) -> Page {
        let slots: Vec<SectionSlot> = SectionId::ORDER
            .into_iter()
            .map(|id| match self.bind(id, record) {
                Ok(view) => SectionSlot::Rendered(view),
                Err(reason) => {
                    warn!(section = %id, %reason, "section omitted");
                    SectionSlot::Omitted { id, reason }
                }
            })
            .collect();

        let page = Page {
            slots,
            title: self.title_for(record),
        };
        debug!(
            sections = page.sections().count(),
            omitted = page.diagnostics().len(),
            "page composed"
        );
        page
    }

    fn bind(&self, id: SectionId, record: &ResumeRecord) -> Result<SectionView, DomainError> {
        Ok(match id {
            SectionId::Navigation => SectionView::Navigation(NavigationView::bind(&record.profile)?),
            SectionId::Hero => SectionView::Hero(HeroView::bind(record)?),
            SectionId::Services => SectionView::Services(ServicesView::bind(record)),
            SectionId::Experience => SectionView::Experience(TimelineView::bind(record)?),
            SectionId::Education => SectionView::Education(EducationView::bind(
                record,
                self.options.show_certifications,
            )),
            SectionId::Contact => SectionView::Contact(ContactView::bind(
                &record.profile,
                self.options.copyright_year,
            )?),
        })
    }

    fn title_for(&self, record: &ResumeRecord) -> String {
        if let Some(title) = &self.options.title {
            return title.clone();
        }
        let profile = &record.profile;
        match (profile.name.is_empty(), profile.role.is_empty()) {
            (false, false) => format!("{} · {}", profile.name, formatter::primary_title(profile)),
            (false, true) => profile.name.clone(),
            _ => "Portfolio".to_owned(),
        }
    }
}
