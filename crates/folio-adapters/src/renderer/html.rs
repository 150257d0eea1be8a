//! Single-document HTML renderer.
//!
//! Output depends only on the page and the view state. Every piece of record
//! text goes through [`Escaped`]; links (`mailto:`, LinkedIn) are passed
//! through as attribute values, escaped but never parsed.

use std::fmt::{self, Write};

use tracing::{debug, instrument};

use folio_core::{
    application::{ApplicationError, ports::PageRenderer},
    domain::{
        ContactView, EducationView, HeroView, NavStyle, NavigationView, Page, RevealKey, SectionId,
        SectionSlot, SectionView, ServicesView, StaggerPlan, TimelineView, ViewState,
    },
    error::FolioResult,
};

const STYLE: &str = include_str!("style.css");

/// HTML-escapes a string on display.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

fn esc(s: &str) -> Escaped<'_> {
    Escaped(s)
}

/// Renders a [`Page`] as one self-contained HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    stagger: StaggerPlan,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nominal stagger for targets the view state carries no latched delay
    /// for. Use the same plan the view session used.
    pub fn with_stagger(stagger: StaggerPlan) -> Self {
        Self { stagger }
    }

    /// `class` and `data-reveal` (plus a delay, if any) for a reveal target.
    fn reveal_attrs(&self, state: &ViewState, key: RevealKey, class: &str) -> String {
        let visible = if state.is_revealed(key) {
            " is-visible"
        } else {
            ""
        };
        let mut attrs = format!(r#"class="{class} reveal{visible}" data-reveal="{key}""#);
        let delay = state
            .latched_delay(key)
            .unwrap_or_else(|| self.stagger.delay_for(key));
        if !delay.is_zero() {
            attrs.push_str(&format!(
                r#" style="--reveal-delay: {}ms""#,
                delay.as_millis()
            ));
        }
        attrs
    }

    fn document(&self, out: &mut String, page: &Page, state: &ViewState) -> fmt::Result {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, r#"<html lang="en">"#)?;
        writeln!(out, "<head>")?;
        writeln!(out, r#"<meta charset="utf-8">"#)?;
        writeln!(
            out,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
        )?;
        writeln!(out, "<title>{}</title>", esc(page.title()))?;
        writeln!(out, "<style>\n{STYLE}</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;

        for slot in page.slots() {
            match slot {
                SectionSlot::Rendered(view) => self.section(out, view, state)?,
                SectionSlot::Omitted { id, .. } => writeln!(out, "<!-- {id}: omitted -->")?,
            }
        }

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }

    fn section(&self, out: &mut String, view: &SectionView, state: &ViewState) -> fmt::Result {
        match view {
            SectionView::Navigation(nav) => nav_bar(out, nav, state),
            SectionView::Hero(hero) => hero_section(out, hero),
            SectionView::Services(services) => self.services(out, services, state),
            SectionView::Experience(timeline) => self.timeline(out, timeline, state),
            SectionView::Education(education) => self.education(out, education, state),
            SectionView::Contact(contact) => self.contact(out, contact, state),
        }
    }

    fn services(&self, out: &mut String, view: &ServicesView, state: &ViewState) -> fmt::Result {
        let id = SectionId::Services;
        writeln!(
            out,
            r#"<section id="{}" {}>"#,
            anchor(id),
            self.reveal_attrs(state, RevealKey::section(id), "services")
        )?;
        writeln!(out, r#"<div class="container">"#)?;
        writeln!(
            out,
            r#"<h2>My Core <span class="accent">Competencies</span></h2>"#
        )?;
        writeln!(out, r#"<div class="cards">"#)?;
        for (index, card) in view.cards.iter().enumerate() {
            writeln!(
                out,
                "<article {}>",
                self.reveal_attrs(state, RevealKey::item(id, index), "card")
            )?;
            writeln!(out, r#"<span class="card__label">{}</span>"#, esc(&card.label))?;
            writeln!(out, "<h3>{}</h3>", esc(&card.title))?;
            writeln!(out, "<ul>")?;
            for detail in &card.details {
                writeln!(out, "<li>{}</li>", esc(detail))?;
            }
            writeln!(out, "</ul>")?;
            writeln!(out, "</article>")?;
        }
        writeln!(out, "</div>")?;
        if !view.skills.is_empty() {
            writeln!(out, r#"<ul class="chips">"#)?;
            for skill in &view.skills {
                writeln!(out, r#"<li class="chip">{}</li>"#, esc(skill))?;
            }
            writeln!(out, "</ul>")?;
        }
        writeln!(out, "</div>")?;
        writeln!(out, "</section>")
    }

    fn timeline(&self, out: &mut String, view: &TimelineView, state: &ViewState) -> fmt::Result {
        let id = SectionId::Experience;
        writeln!(
            out,
            r#"<section id="{}" {}>"#,
            anchor(id),
            self.reveal_attrs(state, RevealKey::section(id), "experience")
        )?;
        writeln!(out, r#"<div class="container">"#)?;
        writeln!(out, r#"<h2>Work <span class="accent">Experience</span></h2>"#)?;
        writeln!(out, r#"<ol class="timeline">"#)?;
        for (index, entry) in view.entries.iter().enumerate() {
            writeln!(
                out,
                r#"<li class="timeline__item" data-job="{}">"#,
                esc(&entry.id)
            )?;
            if entry.has_connector {
                writeln!(out, r#"<div class="timeline__connector"></div>"#)?;
            }
            writeln!(
                out,
                "<div {}>",
                self.reveal_attrs(state, RevealKey::item(id, index), "timeline__card")
            )?;
            writeln!(out, "<h3>{}</h3>", esc(&entry.role))?;
            writeln!(out, r#"<p class="accent">{}</p>"#, esc(&entry.company))?;
            writeln!(out, r#"<span class="period">{}</span>"#, esc(&entry.period))?;
            writeln!(
                out,
                r#"<p class="timeline__quote">&quot;{}&quot;</p>"#,
                esc(&entry.headline)
            )?;
            writeln!(out, r#"<div class="tags">"#)?;
            for tag in &entry.tags {
                writeln!(out, r#"<span class="tag">{}</span>"#, esc(tag))?;
            }
            writeln!(out, "</div>")?;
            writeln!(out, "</div>")?;
            writeln!(out, "</li>")?;
        }
        writeln!(out, "</ol>")?;
        writeln!(out, "</div>")?;
        writeln!(out, "</section>")
    }

    fn education(&self, out: &mut String, view: &EducationView, state: &ViewState) -> fmt::Result {
        writeln!(
            out,
            "<section {}>",
            self.reveal_attrs(state, RevealKey::section(SectionId::Education), "education")
        )?;
        writeln!(out, r#"<div class="container">"#)?;
        writeln!(out, "<h2>Academic Background</h2>")?;
        writeln!(out, r#"<div class="education__grid">"#)?;
        for entry in &view.entries {
            writeln!(out, r#"<div class="education__entry">"#)?;
            writeln!(out, "<h3>{}</h3>", esc(&entry.degree))?;
            writeln!(out, "<p>{}</p>", esc(&entry.school))?;
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</div>")?;
        if !view.certifications.is_empty() {
            writeln!(out, r#"<ul class="certifications">"#)?;
            for certification in &view.certifications {
                writeln!(out, "<li>{}</li>", esc(certification))?;
            }
            writeln!(out, "</ul>")?;
        }
        writeln!(out, "</div>")?;
        writeln!(out, "</section>")
    }

    fn contact(&self, out: &mut String, view: &ContactView, state: &ViewState) -> fmt::Result {
        let id = SectionId::Contact;
        writeln!(
            out,
            r#"<section id="{}" {}>"#,
            anchor(id),
            self.reveal_attrs(state, RevealKey::section(id), "contact")
        )?;
        writeln!(out, r#"<div class="container">"#)?;
        writeln!(out, r#"<div class="contact__cta">"#)?;
        writeln!(out, "<h2>Have an Awesome Project?</h2>")?;
        writeln!(
            out,
            r#"<a class="btn" href="{}">Let's Discuss</a>"#,
            esc(&view.mailto())
        )?;
        writeln!(out, "</div>")?;
        writeln!(out, r#"<footer class="contact__footer">"#)?;
        brand(out, view.brand_mark, &view.brand_name)?;
        if !view.summary.is_empty() {
            writeln!(out, r#"<p class="summary">{}</p>"#, esc(&view.summary))?;
        }
        writeln!(out, r#"<ul class="contact__details">"#)?;
        for (class, value) in [
            ("email", &view.email),
            ("phone", &view.phone),
            ("location", &view.location),
        ] {
            if !value.is_empty() {
                writeln!(out, r#"<li class="{class}">{}</li>"#, esc(value))?;
            }
        }
        writeln!(out, "</ul>")?;
        if !view.linkedin.is_empty() {
            writeln!(
                out,
                r#"<a class="social" href="{}" rel="noopener">LinkedIn</a>"#,
                esc(&view.linkedin)
            )?;
        }
        match view.copyright_year {
            Some(year) => writeln!(
                out,
                r#"<p class="copyright">&copy; {year} {}. All rights reserved.</p>"#,
                esc(&view.copyright_holder)
            )?,
            None => writeln!(
                out,
                r#"<p class="copyright">&copy; {}. All rights reserved.</p>"#,
                esc(&view.copyright_holder)
            )?,
        }
        writeln!(out, "</footer>")?;
        writeln!(out, "</div>")?;
        writeln!(out, "</section>")
    }
}

fn anchor(id: SectionId) -> &'static str {
    id.anchor().unwrap_or(id.as_str())
}

fn brand(out: &mut String, mark: char, name: &str) -> fmt::Result {
    let mut buf = [0u8; 4];
    writeln!(
        out,
        r#"<div class="brand"><span class="brand__mark">{}</span><span>{}<span class="accent">.</span></span></div>"#,
        esc(mark.encode_utf8(&mut buf)),
        esc(name)
    )
}

fn nav_bar(out: &mut String, view: &NavigationView, state: &ViewState) -> fmt::Result {
    let style = match state.nav_style() {
        NavStyle::Compact => "compact",
        NavStyle::Expanded => "expanded",
    };
    writeln!(out, r#"<nav class="nav nav--{style}" data-nav-style="{style}">"#)?;
    writeln!(out, r#"<div class="container">"#)?;
    brand(out, view.brand_mark, &view.brand_name)?;
    writeln!(out, r#"<div class="nav__links">"#)?;
    for link in &view.links {
        writeln!(out, r#"<a href="{}">{}</a>"#, link.href(), esc(link.label))?;
    }
    writeln!(out, "</div>")?;
    writeln!(
        out,
        r##"<a class="btn btn--dark" href="#{}">Let's Talk</a>"##,
        anchor(view.call_to_action)
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "</nav>")
}

fn hero_section(out: &mut String, view: &HeroView) -> fmt::Result {
    writeln!(
        out,
        r#"<section id="{}" class="hero">"#,
        anchor(SectionId::Hero)
    )?;
    writeln!(out, r#"<div class="container">"#)?;
    writeln!(
        out,
        r#"<h1>I'm <span class="accent">{}</span>,<br>{}</h1>"#,
        esc(&view.first_name),
        esc(&view.title)
    )?;
    if !view.tagline.is_empty() {
        writeln!(out, r#"<p class="tagline">{}</p>"#, esc(&view.tagline))?;
    }
    writeln!(out, r#"<div class="actions">"#)?;
    writeln!(
        out,
        r##"<a class="btn btn--primary" href="#{}">Hire Me</a>"##,
        anchor(SectionId::Contact)
    )?;
    if !view.portfolio_url.is_empty() {
        writeln!(
            out,
            r#"<a class="btn btn--outline" href="{}" target="_blank" rel="noopener">Portfolio</a>"#,
            esc(&view.portfolio_url)
        )?;
    }
    writeln!(out, "</div>")?;
    if !view.highlights.is_empty() {
        writeln!(out, r#"<dl class="stats">"#)?;
        for highlight in &view.highlights {
            writeln!(
                out,
                "<div><dt>{}</dt><dd>{}</dd></div>",
                esc(&highlight.value),
                esc(&highlight.label)
            )?;
        }
        writeln!(out, "</dl>")?;
    }
    writeln!(
        out,
        r#"<div class="avatar" aria-hidden="true">{}</div>"#,
        esc(&view.initials)
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "</section>")
}

impl PageRenderer for HtmlRenderer {
    #[instrument(skip_all, fields(title = %page.title()))]
    fn render(&self, page: &Page, state: &ViewState) -> FolioResult<String> {
        let mut out = String::with_capacity(16 * 1024);
        self.document(&mut out, page, state)
            .map_err(|e| ApplicationError::RenderingFailed {
                reason: e.to_string(),
            })?;
        debug!(bytes = out.len(), "page rendered");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use folio_core::domain::{Job, PageComposer, PageOptions, Profile, ResumeRecord, Service};

    fn record() -> ResumeRecord {
        let mut record = ResumeRecord::with_profile(Profile {
            name: "Jordan Rivera".into(),
            role: "Senior Growth Lead".into(),
            tagline: "Numbers & <narrative>".into(),
            email: "jordan@example.com".into(),
            phone: String::new(),
            location: "Lisbon".into(),
            linkedin: "https://example.com/in/jordan?a=1&b=2".into(),
        });
        record.services = vec![
            Service {
                label: "Strategy".into(),
                title: "Growth".into(),
                details: vec!["Discovery".into()],
            },
            Service {
                label: "Analytics".into(),
                title: "Experiments".into(),
                details: vec![],
            },
        ];
        record.experience = (0..2)
            .map(|i| Job {
                id: format!("job-{i}"),
                role: format!("Role {i}"),
                company: "Acme".into(),
                period: "2020".into(),
                achievements: vec![format!("Win {i}"), "Ignored".into()],
                tags: vec!["sql".into(), "growth".into()],
            })
            .collect();
        record
    }

    fn render(record: &ResumeRecord, state: &ViewState) -> String {
        let page = PageComposer::default().compose(record);
        HtmlRenderer::new().render(&page, state).unwrap()
    }

    fn revealed(record: &ResumeRecord) -> ViewState {
        ViewState::fully_revealed(PageComposer::default().compose(record).reveal_targets())
    }

    #[test]
    fn escapes_record_text() {
        assert_eq!(
            esc(r#"<a href="x">Tom & 'Jerry'</a>"#).to_string(),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        let html = render(&record(), &ViewState::default());
        assert!(html.contains("Numbers &amp; &lt;narrative&gt;"));
        assert!(html.contains(r#"href="https://example.com/in/jordan?a=1&amp;b=2""#));
    }

    #[test]
    fn hero_shows_first_name_and_primary_title() {
        let html = render(&record(), &ViewState::default());
        assert!(html.contains(r#"I'm <span class="accent">Jordan</span>,<br>Growth Lead</h1>"#));
        assert!(html.contains(r#"<div class="avatar" aria-hidden="true">JR</div>"#));
    }

    #[test]
    fn nav_style_tracks_scroll_state() {
        let record = record();
        let html = render(&record, &ViewState::default());
        assert!(html.contains(r#"class="nav nav--expanded""#));

        let mut state = ViewState::default();
        state.scrolled = true;
        let html = render(&record, &state);
        assert!(html.contains(r#"class="nav nav--compact""#));
    }

    #[test]
    fn anchors_present_in_order() {
        let html = render(&record(), &ViewState::default());
        let positions: Vec<usize> = ["home", "services", "experience", "contact"]
            .iter()
            .map(|anchor| html.find(&format!(r#"id="{anchor}""#)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains(r##"<a href="#services">Expertise</a>"##));
    }

    #[test]
    fn reveal_classes_follow_state() {
        let record = record();
        let pending = render(&record, &ViewState::default());
        assert!(!pending.contains("is-visible"));

        let visible = render(&record, &revealed(&record));
        assert!(visible.contains(r#"class="card reveal is-visible" data-reveal="services[0]""#));
        assert!(visible.contains(r#"data-reveal="experience[1]" style="--reveal-delay: 100ms""#));
        assert!(visible.contains(r#"data-reveal="services[1]" style="--reveal-delay: 200ms""#));
    }

    #[test]
    fn latched_delay_overrides_nominal_stagger() {
        let record = record();
        let mut state = revealed(&record);
        state
            .delays
            .insert(RevealKey::item(SectionId::Services, 1), Duration::from_millis(750));

        let html = render(&record, &state);
        assert!(html.contains(r#"data-reveal="services[1]" style="--reveal-delay: 750ms""#));
        assert!(html.contains(r#"data-reveal="experience[1]" style="--reveal-delay: 100ms""#));

        state
            .delays
            .insert(RevealKey::item(SectionId::Experience, 1), Duration::ZERO);
        let html = render(&record, &state);
        assert!(!html.contains(r#"data-reveal="experience[1]" style="#));
    }

    #[test]
    fn custom_stagger_changes_delays() {
        let record = record();
        let page = PageComposer::default().compose(&record);
        let html = HtmlRenderer::with_stagger(StaggerPlan::none())
            .render(&page, &ViewState::default())
            .unwrap();
        assert!(!html.contains("--reveal-delay"));
    }

    #[test]
    fn timeline_shows_first_achievement_and_all_tags() {
        let html = render(&record(), &ViewState::default());
        assert!(html.contains("&quot;Win 0&quot;"));
        assert!(!html.contains("Ignored"));
        assert_eq!(html.matches(r#"<span class="tag">sql</span>"#).count(), 2);
        // last entry has no connector
        assert_eq!(html.matches("timeline__connector\"></div>").count(), 1);
    }

    #[test]
    fn omitted_section_leaves_marker() {
        let mut record = record();
        record.experience[1].achievements.clear();
        let html = render(&record, &ViewState::default());
        assert!(html.contains("<!-- experience: omitted -->"));
        assert!(!html.contains(r#"id="experience""#));
        assert!(html.contains(r#"id="contact""#));
    }

    #[test]
    fn copyright_and_certifications() {
        let mut record = record();
        record.certifications = vec!["CSPO".into()];
        let page = PageComposer::new(PageOptions {
            show_certifications: true,
            copyright_year: Some(2025),
            title: None,
        })
        .compose(&record);
        let html = HtmlRenderer::new()
            .render(&page, &ViewState::default())
            .unwrap();
        assert!(html.contains("&copy; 2025 Jordan Rivera. All rights reserved."));
        assert!(html.contains("<li>CSPO</li>"));
        assert!(html.contains("<title>Jordan Rivera · Growth Lead</title>"));
    }
}
