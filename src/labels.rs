//! Plural label formatting for row subtitles ("3 albums", "1 song").
//!
//! Templates come from configuration; `%d` is replaced by the count.

use serde::Deserialize;

/// Which counted noun a label describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    Albums,
    Songs,
}

/// Formats a count into a human label for a given key.
pub trait PluralFormatter {
    fn format_plural(&self, key: LabelKey, count: u32) -> String;
}

/// Singular/plural template pair.
///
/// When `one` is absent, `other` is used for every count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluralTemplate {
    #[serde(default)]
    pub one: Option<String>,
    pub other: String,
}

impl PluralTemplate {
    pub fn new(one: &str, other: &str) -> Self {
        Self {
            one: Some(one.to_string()),
            other: other.to_string(),
        }
    }

    /// A template with a single form for all counts.
    pub fn uniform(other: &str) -> Self {
        Self {
            one: None,
            other: other.to_string(),
        }
    }

    fn render(&self, count: u32) -> String {
        let template = match (&self.one, count) {
            (Some(one), 1) => one,
            _ => &self.other,
        };
        template.replace("%d", &count.to_string())
    }
}

/// Label templates for every `LabelKey`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub albums: PluralTemplate,
    pub songs: PluralTemplate,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            albums: PluralTemplate::new("%d album", "%d albums"),
            songs: PluralTemplate::new("%d song", "%d songs"),
        }
    }
}

impl PluralFormatter for Labels {
    fn format_plural(&self, key: LabelKey, count: u32) -> String {
        match key {
            LabelKey::Albums => self.albums.render(count),
            LabelKey::Songs => self.songs.render(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_pluralize() {
        let labels = Labels::default();
        assert_eq!(labels.format_plural(LabelKey::Albums, 1), "1 album");
        assert_eq!(labels.format_plural(LabelKey::Albums, 3), "3 albums");
        assert_eq!(labels.format_plural(LabelKey::Songs, 0), "0 songs");
        assert_eq!(labels.format_plural(LabelKey::Songs, 1), "1 song");
    }

    #[test]
    fn test_uniform_template_ignores_count() {
        let labels = Labels {
            albums: PluralTemplate::uniform("%d albums"),
            songs: PluralTemplate::uniform("%d songs"),
        };
        assert_eq!(labels.format_plural(LabelKey::Albums, 1), "1 albums");
        assert_eq!(labels.format_plural(LabelKey::Songs, 12), "12 songs");
    }

    #[test]
    fn test_template_without_placeholder() {
        let labels = Labels {
            albums: PluralTemplate::new("one album", "many albums"),
            ..Labels::default()
        };
        assert_eq!(labels.format_plural(LabelKey::Albums, 1), "one album");
        assert_eq!(labels.format_plural(LabelKey::Albums, 9), "many albums");
    }
}
