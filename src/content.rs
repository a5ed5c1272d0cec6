//! Static page content.
//!
//! Everything the page shows is plain data loaded once at startup and never
//! mutated: profile, skills, projects, education, hackathons, blog posts,
//! marquee strips and the hero terminal script. The default document is
//! compiled into the binary; a JSON file with the same shape can replace it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::typing::{ScriptLine, Typewriter};

/// Content shipped with the binary.
pub const EMBEDDED_CONTENT: &str = include_str!("../content/portfolio.json");

/// A labelled outbound link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    #[serde(default)]
    pub badge: String,
    pub location: String,
    /// Resume document, relative to the asset root.
    pub resume: String,
    /// Profile photo, relative to the asset root.
    pub photo: String,
    #[serde(default)]
    pub terminal_title: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    /// Target of the "see all projects" card at the end of the rail.
    #[serde(default)]
    pub projects_url: String,
}

/// A navbar entry pointing at a section anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub id: String,
}

/// A headline number in the about grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u32,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTag {
    pub name: String,
    /// CSS hex colour, `#rgb` or `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub github: String,
    pub live: String,
    pub color: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub period: String,
    pub title: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub chips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackathonEntry {
    pub id: u32,
    pub name: String,
    pub date: String,
    pub award: String,
    /// Event photo, relative to the asset root.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub date: String,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One looping marquee strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarqueeStrip {
    pub items: Vec<String>,
    #[serde(default)]
    pub reverse: bool,
}

/// The whole content document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub profile: Profile,
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    pub skills: Vec<SkillTag>,
    pub projects: Vec<Project>,
    pub education: Vec<EducationEntry>,
    pub hackathons: Vec<HackathonEntry>,
    pub blog: Vec<BlogPost>,
    #[serde(default)]
    pub marquees: Vec<MarqueeStrip>,
    #[serde(default = "Typewriter::default_script")]
    pub terminal: Vec<ScriptLine>,
}

impl Content {
    /// Parse a content document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "content".into(),
            source,
        })
    }

    /// The content compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_CONTENT)
    }

    /// Load a content document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), projects = content.projects.len(), "loaded content");
        Ok(content)
    }

    /// Load from `path` when given, otherwise use the embedded document.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }
}

/// Parse a CSS hex colour (`#rgb` or `#rrggbb`) into RGB components in
/// `[0, 1]`.
///
/// ```
/// use folio::content::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#fff"), Some([1.0, 1.0, 1.0]));
/// assert_eq!(parse_hex_color("nope"), None);
/// ```
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match digits.len() {
        3 => {
            let mut out = [0.0; 3];
            for (i, c) in digits.chars().enumerate() {
                let doubled: String = [c, c].iter().collect();
                out[i] = channel(&doubled)?;
            }
            Some(out)
        }
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_parses() {
        let content = Content::embedded().unwrap();
        assert_eq!(content.projects.len(), 5);
        assert_eq!(content.hackathons.len(), 5);
        assert_eq!(content.blog.len(), 3);
        assert_eq!(content.education.len(), 4);
        assert_eq!(content.terminal.len(), 6);
        assert_eq!(content.marquees.len(), 2);
        assert!(content.marquees[1].reverse);
    }

    #[test]
    fn test_embedded_colours_parse() {
        let content = Content::embedded().unwrap();
        for skill in &content.skills {
            assert!(parse_hex_color(&skill.color).is_some(), "{}", skill.color);
        }
        for project in &content.projects {
            assert!(parse_hex_color(&project.color).is_some(), "{}", project.color);
        }
    }

    #[test]
    fn test_optional_fields() {
        let content = Content::embedded().unwrap();
        let certs = &content.education[1];
        assert_eq!(certs.place, None);
        assert_eq!(certs.chips.len(), 2);
    }

    #[test]
    fn test_missing_terminal_uses_default_script() {
        let mut value: serde_json::Value = serde_json::from_str(EMBEDDED_CONTENT).unwrap();
        value.as_object_mut().unwrap().remove("terminal");
        let content: Content = serde_json::from_value(value).unwrap();
        assert_eq!(content.terminal, Typewriter::default_script());
    }

    #[test]
    fn test_parse_error_reported() {
        let err = Content::from_json("{\"profile\": 3}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_hex_colours() {
        assert_eq!(parse_hex_color("#000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("123456"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
