//! Resume section detection

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Contact,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certifications,
    ];

    /// Sections an ATS expects on every resume. Certifications are optional.
    pub const REQUIRED: [Section; 5] = [
        Section::Contact,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
    ];

    fn synonyms(self) -> &'static str {
        match self {
            Section::Contact => r"contact|email|phone",
            Section::Summary => r"summary|objective|professional summary",
            Section::Experience => r"experience|work history|employment",
            Section::Education => r"education|degree|school|university",
            Section::Skills => r"skills|technical|proficiency",
            Section::Certifications => r"certification|credential|license",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Contact => "Contact",
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Certifications => "Certifications",
        };
        write!(f, "{}", name)
    }
}

pub struct SectionDetector {
    patterns: Vec<(Section, Regex)>,
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionDetector {
    pub fn new() -> Self {
        let patterns = Section::ALL
            .iter()
            .map(|&section| {
                let regex = Regex::new(section.synonyms()).expect("Invalid section regex");
                (section, regex)
            })
            .collect();

        Self { patterns }
    }

    /// Sections whose synonyms occur anywhere in the lowercased resume
    pub fn detect(&self, lowered_resume: &str) -> Vec<Section> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(lowered_resume))
            .map(|(section, _)| *section)
            .collect()
    }
}

/// Required sections that were not detected
pub fn missing_sections(found: &[Section]) -> Vec<Section> {
    Section::REQUIRED
        .iter()
        .filter(|s| !found.contains(s))
        .copied()
        .collect()
}
