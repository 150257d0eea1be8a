//! The resume record: static input data, loaded once and never mutated.
//!
//! Field names follow the JSON document (`core_expertise`, `experience`, ...)
//! so the record deserializes directly with serde.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, formatter};

/// The complete resume record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub profile: Profile,

    /// Skill labels, rendered in array order.
    #[serde(default)]
    pub core_expertise: Vec<String>,

    /// Jobs, in source order (reverse-chronological by convention).
    #[serde(default)]
    pub experience: Vec<Job>,

    #[serde(default)]
    pub education: Vec<Education>,

    /// Present in the data; only rendered when explicitly enabled.
    #[serde(default)]
    pub certifications: Vec<String>,

    /// Service cards shown above the expertise chips.
    #[serde(default)]
    pub services: Vec<Service>,

    /// Headline stats shown under the hero call-to-action.
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub tagline: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    /// Opaque pass-through URL.
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub role: String,
    pub company: String,
    /// Display string, never parsed.
    pub period: String,
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub label: String,
    pub title: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub value: String,
    pub label: String,
}

impl ResumeRecord {
    /// Build a record with only a profile; every list is empty.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile,
            core_expertise: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            services: Vec::new(),
            highlights: Vec::new(),
        }
    }

    /// Collect every invariant violation in the record.
    ///
    /// Returns an empty vector for a conforming record. Problems are
    /// reported all at once so `folio check` can list them together.
    pub fn validate(&self) -> Vec<DomainError> {
        let mut problems = Vec::new();

        // Same rule the hero and contact sections render with.
        if let Err(err) = formatter::first_name(&self.profile) {
            problems.push(err.into());
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, job) in self.experience.iter().enumerate() {
            if let Some(&first) = seen.get(job.id.as_str()) {
                problems.push(DomainError::DuplicateJobId {
                    id: job.id.clone(),
                    first,
                    second: index,
                });
            } else {
                seen.insert(job.id.as_str(), index);
            }

            if job.achievements.is_empty() {
                problems.push(DomainError::EmptyAchievements { id: job.id.clone() });
            }
        }

        problems
    }
}

impl Job {
    /// The quote shown on the timeline card.
    pub fn headline_achievement(&self) -> Result<&str, DomainError> {
        self.achievements
            .first()
            .map(String::as_str)
            .ok_or_else(|| DomainError::EmptyAchievements {
                id: self.id.clone(),
            })
    }
}
