//! Section view models and the pure builders that bind them to the record.

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    formatter,
    page::SectionId,
    record::{Education, Highlight, Profile, ResumeRecord, Service},
};

// ── Navigation ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub target: SectionId,
}

impl NavLink {
    /// `#anchor` href. Every linked section has an anchor.
    pub fn href(&self) -> String {
        format!("#{}", self.target.anchor().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub brand_mark: char,
    pub brand_name: String,
    pub links: Vec<NavLink>,
    /// "Let's Talk" button target.
    pub call_to_action: SectionId,
}

impl NavigationView {
    pub fn bind(profile: &Profile) -> Result<Self, DomainError> {
        Ok(Self {
            brand_mark: formatter::brand_mark(profile)?,
            brand_name: formatter::first_name(profile)?.to_owned(),
            links: vec![
                NavLink {
                    label: "Home",
                    target: SectionId::Hero,
                },
                NavLink {
                    label: "Expertise",
                    target: SectionId::Services,
                },
                NavLink {
                    label: "Experience",
                    target: SectionId::Experience,
                },
                NavLink {
                    label: "Contact",
                    target: SectionId::Contact,
                },
            ],
            call_to_action: SectionId::Contact,
        })
    }
}

// ── Hero ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroView {
    pub first_name: String,
    pub title: String,
    pub tagline: String,
    pub initials: String,
    pub highlights: Vec<Highlight>,
    /// Opaque outbound link for the "Portfolio" button.
    pub portfolio_url: String,
}

impl HeroView {
    pub fn bind(record: &ResumeRecord) -> Result<Self, DomainError> {
        let profile = &record.profile;
        Ok(Self {
            first_name: formatter::first_name(profile)?.to_owned(),
            title: formatter::primary_title(profile).to_owned(),
            tagline: profile.tagline.clone(),
            initials: formatter::initials(profile)?,
            highlights: record.highlights.clone(),
            portfolio_url: profile.linkedin.clone(),
        })
    }
}

// ── Services ──────────────────────────────────────────────────────────────────

pub type ServiceCard = Service;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicesView {
    pub cards: Vec<ServiceCard>,
    /// Expertise chips, in record order.
    pub skills: Vec<String>,
}

impl ServicesView {
    pub fn bind(record: &ResumeRecord) -> Self {
        Self {
            cards: record.services.clone(),
            skills: record.core_expertise.clone(),
        }
    }
}

// ── Experience ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    /// `achievements[0]`, shown as the entry's quote.
    pub headline: String,
    pub tags: Vec<String>,
    /// Whether a connector line runs down to the next entry.
    pub has_connector: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub entries: Vec<TimelineEntry>,
}

impl TimelineView {
    /// Entries in input order. Fails if any job has no achievements.
    pub fn bind(record: &ResumeRecord) -> Result<Self, DomainError> {
        let last = record.experience.len().saturating_sub(1);
        let entries = record
            .experience
            .iter()
            .enumerate()
            .map(|(index, job)| {
                Ok(TimelineEntry {
                    id: job.id.clone(),
                    role: job.role.clone(),
                    company: job.company.clone(),
                    period: job.period.clone(),
                    headline: job.headline_achievement()?.to_owned(),
                    tags: job.tags.clone(),
                    has_connector: index != last,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { entries })
    }
}

// ── Education ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationView {
    pub entries: Vec<Education>,
    /// Empty unless certifications are enabled for the page.
    pub certifications: Vec<String>,
}

impl EducationView {
    pub fn bind(record: &ResumeRecord, show_certifications: bool) -> Self {
        Self {
            entries: record.education.clone(),
            certifications: if show_certifications {
                record.certifications.clone()
            } else {
                Vec::new()
            },
        }
    }
}

// ── Contact ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub brand_mark: char,
    pub brand_name: String,
    /// Footer blurb under the logo.
    pub summary: String,
    pub copyright_holder: String,
    pub copyright_year: Option<i32>,
}

impl ContactView {
    pub fn bind(profile: &Profile, copyright_year: Option<i32>) -> Result<Self, DomainError> {
        Ok(Self {
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            location: profile.location.clone(),
            linkedin: profile.linkedin.clone(),
            brand_mark: formatter::brand_mark(profile)?,
            brand_name: formatter::first_name(profile)?.to_owned(),
            summary: footer_summary(profile),
            copyright_holder: profile.name.clone(),
            copyright_year,
        })
    }

    /// `mailto:` link, passed through unvalidated.
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

fn footer_summary(profile: &Profile) -> String {
    match (profile.role.is_empty(), profile.tagline.is_empty()) {
        (false, false) => format!("{} · {}", profile.role, profile.tagline),
        (false, true) => profile.role.clone(),
        (true, _) => profile.tagline.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Job;

    fn record() -> ResumeRecord {
        let mut record = ResumeRecord::with_profile(Profile {
            name: "Jordan Rivera".into(),
            role: "Senior Growth Lead".into(),
            tagline: "Builds funnels".into(),
            email: "jordan@rivera.dev".into(),
            phone: "+1 555 0100".into(),
            location: "Lisbon".into(),
            linkedin: "https://linkedin.com/in/jrivera".into(),
        });
        record.experience = (0..3)
            .map(|i| Job {
                id: format!("job-{i}"),
                role: "PM".into(),
                company: format!("Co {i}"),
                period: "2020".into(),
                achievements: vec![format!("win {i}"), "more".into()],
                tags: vec!["a".into(), "b".into()],
            })
            .collect();
        record
    }

    #[test]
    fn hero_uses_formatted_fields() {
        let hero = HeroView::bind(&record()).unwrap();
        assert_eq!(hero.first_name, "Jordan");
        assert_eq!(hero.title, "Growth Lead");
        assert_eq!(hero.initials, "JR");
    }

    #[test]
    fn timeline_connectors_skip_last_entry() {
        let timeline = TimelineView::bind(&record()).unwrap();
        let connectors: Vec<_> = timeline.entries.iter().map(|e| e.has_connector).collect();
        assert_eq!(connectors, vec![true, true, false]);
        assert_eq!(timeline.entries[1].headline, "win 1");
    }

    #[test]
    fn timeline_fails_on_job_without_achievements() {
        let mut record = record();
        record.experience[2].achievements.clear();
        assert_eq!(
            TimelineView::bind(&record),
            Err(DomainError::EmptyAchievements { id: "job-2".into() })
        );
    }

    #[test]
    fn nav_links_point_at_anchors() {
        let nav = NavigationView::bind(&record().profile).unwrap();
        let hrefs: Vec<_> = nav.links.iter().map(NavLink::href).collect();
        assert_eq!(hrefs, vec!["#home", "#services", "#experience", "#contact"]);
        assert_eq!(nav.brand_mark, 'J');
    }

    #[test]
    fn certifications_hidden_by_default() {
        let mut record = record();
        record.certifications = vec!["CSPO".into()];
        assert!(EducationView::bind(&record, false).certifications.is_empty());
        assert_eq!(EducationView::bind(&record, true).certifications, vec!["CSPO"]);
    }

    #[test]
    fn contact_mailto_passes_email_through() {
        let contact = ContactView::bind(&record().profile, Some(2025)).unwrap();
        assert_eq!(contact.mailto(), "mailto:jordan@rivera.dev");
        assert_eq!(contact.summary, "Senior Growth Lead · Builds funnels");
    }
}
