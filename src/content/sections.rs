//! Resume section content and the layout used to present it on a panel.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::errors::OrreryError;

const SECTIONS_OVERRIDE_PATH: &str = "config/sections.json";

/// How a section's items are laid out on its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLayout {
    #[default]
    List,
    /// Items are `header: description` pairs shown as a timeline.
    Timeline,
}

/// One resume category, tied 1:1 to a celestial body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub title: String,
    /// Key of the body this section belongs to.
    pub planet: String,
    pub items: Vec<String>,
    #[serde(default)]
    pub layout: SectionLayout,
}

impl Section {
    fn builtin(
        title: &str,
        planet: &str,
        layout: SectionLayout,
        items: &[&str],
    ) -> Self {
        Self {
            title: title.to_string(),
            planet: planet.to_string(),
            items: items.iter().map(|item| item.to_string()).collect(),
            layout,
        }
    }

    /// Builds the panel content for this section.
    pub fn panel_content(&self) -> PanelContent {
        let body = match self.layout {
            SectionLayout::List => PanelBody::List(self.items.clone()),
            SectionLayout::Timeline => PanelBody::Timeline(
                self.items
                    .iter()
                    .map(|item| TimelineEntry::parse(item))
                    .collect(),
            ),
        };

        PanelContent {
            title: self.title.clone(),
            body,
        }
    }
}

/// A timeline row split into its header and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub header: String,
    pub description: String,
}

impl TimelineEntry {
    /// Splits at the first colon; later colons stay in the description.
    pub fn parse(item: &str) -> Self {
        match item.split_once(':') {
            Some((header, rest)) => Self {
                header: header.trim().to_string(),
                description: rest.trim().to_string(),
            },
            None => Self {
                header: item.trim().to_string(),
                description: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    List(Vec<String>),
    Timeline(Vec<TimelineEntry>),
}

/// Everything a panel canvas needs to draw a section.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub title: String,
    pub body: PanelBody,
}

/// Read-only lookup from body key to section content.
#[derive(Resource, Debug, Clone)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The built-in resume content.
    pub fn builtin() -> Self {
        use SectionLayout::{List, Timeline};

        Self::new(vec![
            Section::builtin(
                "Skills",
                "skills",
                List,
                &[
                    "React",
                    "React Native",
                    "TypeScript",
                    "Redux",
                    "Jest",
                    "Java / Spring",
                    "Node.js",
                    "HTML / SCSS / JS",
                    "AEM",
                ],
            ),
            Section::builtin(
                "Education",
                "education",
                List,
                &[
                    "Integrated Master in Information and Communication Systems Engineering",
                    "University of the Aegean (2014 - 2019)",
                ],
            ),
            Section::builtin(
                "Experience",
                "experience",
                Timeline,
                &[
                    "React Developer - Cruise line (Dec 2024 - Present): Responsive, modular UI components with React, TypeScript, Redux, Java and AEM",
                    "React Native Developer - Energy provider (Jan 2024 - Dec 2024): Mobile app overhaul, AEM and Google Analytics 4 integration",
                    "React Developer - Brewery group (Oct 2022 - Jan 2024): Reusable AEM modules and SAP integrations",
                    "React Developer - Coffee roaster (Dec 2020 - Oct 2022): Interactive React components within AEM workflows",
                ],
            ),
            Section::builtin(
                "Certifications",
                "certifications",
                List,
                &[
                    "Adobe Certified Expert - AEM Sites Business Practitioner",
                    "Basic Life Support (BLS)",
                ],
            ),
            Section::builtin(
                "Contact",
                "contact",
                List,
                &["hello@example.com", "linkedin.com/in/your-profile"],
            ),
            Section::builtin(
                "Languages",
                "languages",
                List,
                &["Greek (Native)", "English (C2)"],
            ),
            Section::builtin(
                "Soft Skills",
                "soft_skills",
                List,
                &[
                    "Highly adaptable",
                    "Fast learner",
                    "Effective communicator",
                    "Team-oriented",
                    "Mentoring & onboarding",
                    "Problem-solving mindset",
                ],
            ),
        ])
    }

    /// Uses `config/sections.json` when present, otherwise the built-in table.
    pub fn load_or_builtin() -> Self {
        let path = Path::new(SECTIONS_OVERRIDE_PATH);
        if !path.exists() {
            return Self::builtin();
        }

        let loaded = fs::read_to_string(path)
            .map_err(|err| OrreryError::section_table(SECTIONS_OVERRIDE_PATH, err))
            .and_then(|data| Self::from_json_str(&data));

        match loaded {
            Ok(table) => {
                info!(
                    "Loaded {} sections from {}",
                    table.len(),
                    SECTIONS_OVERRIDE_PATH
                );
                table
            }
            Err(err) => {
                warn!("{}. Falling back to built-in sections.", err);
                Self::builtin()
            }
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self, OrreryError> {
        let sections: Vec<Section> = serde_json::from_str(data)
            .map_err(|err| OrreryError::section_table(SECTIONS_OVERRIDE_PATH, err))?;

        for (index, section) in sections.iter().enumerate() {
            if sections[..index]
                .iter()
                .any(|earlier| earlier.planet == section.planet)
            {
                return Err(OrreryError::section_table(
                    SECTIONS_OVERRIDE_PATH,
                    format!("planet '{}' listed twice", section.planet),
                ));
            }
        }

        Ok(Self::new(sections))
    }

    /// Finds the section attached to a body key.
    pub fn for_key(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.planet == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SectionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
