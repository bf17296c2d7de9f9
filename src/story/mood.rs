//! Reading moods and their emoji / background gradient

use crate::render::{Gradient, Rgb};

const DEFAULT_GRADIENT: Gradient = Gradient::diagonal(Rgb(0x66, 0x7e, 0xea), Rgb(0x76, 0x4b, 0xa2));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Inspirado,
    Emocionado,
    Reflexivo,
    Entretido,
    Surpreso,
    Relaxado,
    Ansioso,
    Nostalgico,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Inspirado,
        Mood::Emocionado,
        Mood::Reflexivo,
        Mood::Entretido,
        Mood::Surpreso,
        Mood::Relaxado,
        Mood::Ansioso,
        Mood::Nostalgico,
    ];

    /// Parse a stored value, ignoring case and surrounding whitespace
    pub fn parse(value: &str) -> Option<Mood> {
        let normalized = value.trim().to_lowercase();
        Mood::ALL.into_iter().find(|m| m.label() == normalized)
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Inspirado => "inspirado",
            Mood::Emocionado => "emocionado",
            Mood::Reflexivo => "reflexivo",
            Mood::Entretido => "entretido",
            Mood::Surpreso => "surpreso",
            Mood::Relaxado => "relaxado",
            Mood::Ansioso => "ansioso",
            Mood::Nostalgico => "nostálgico",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Inspirado => "✨",
            Mood::Emocionado => "❤️",
            Mood::Reflexivo => "🤔",
            Mood::Entretido => "😄",
            Mood::Surpreso => "😮",
            Mood::Relaxado => "😌",
            Mood::Ansioso => "😰",
            Mood::Nostalgico => "💭",
        }
    }

    pub fn gradient(self) -> Gradient {
        let (from, to) = match self {
            Mood::Inspirado => return DEFAULT_GRADIENT,
            Mood::Emocionado => ("#f093fb", "#f5576c"),
            Mood::Reflexivo => ("#4facfe", "#00f2fe"),
            Mood::Entretido => ("#43e97b", "#38f9d7"),
            Mood::Surpreso => ("#fa709a", "#fee140"),
            Mood::Relaxado => ("#a8edea", "#fed6e3"),
            Mood::Ansioso => ("#ff9a9e", "#fecfef"),
            Mood::Nostalgico => ("#ffecd2", "#fcb69f"),
        };
        // Table literals are well-formed
        Gradient::diagonal(
            Rgb::from_hex(from).unwrap_or(DEFAULT_GRADIENT.from),
            Rgb::from_hex(to).unwrap_or(DEFAULT_GRADIENT.to),
        )
    }
}

/// Display data for a mood value as shown on a card
#[derive(Debug, Clone, PartialEq)]
pub struct MoodMeta {
    pub mood: Option<Mood>,
    pub label: String,
    pub emoji: &'static str,
    pub gradient: Gradient,
}

/// Resolve a free-text mood. Unknown values keep their normalized label with
/// the default emoji and gradient; blank values get the "default" label.
pub fn mood_meta(value: Option<&str>) -> MoodMeta {
    let normalized = value.map(|v| v.trim().to_lowercase()).unwrap_or_default();

    if normalized.is_empty() {
        return MoodMeta {
            mood: None,
            label: "default".to_string(),
            emoji: "📚",
            gradient: DEFAULT_GRADIENT,
        };
    }

    match Mood::parse(&normalized) {
        Some(mood) => MoodMeta {
            mood: Some(mood),
            label: mood.label().to_string(),
            emoji: mood.emoji(),
            gradient: mood.gradient(),
        },
        None => MoodMeta {
            mood: None,
            label: normalized,
            emoji: "📚",
            gradient: DEFAULT_GRADIENT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxado_is_stable_regardless_of_case() {
        for raw in ["relaxado", "  Relaxado ", "RELAXADO\n"] {
            let meta = mood_meta(Some(raw));
            assert_eq!(meta.mood, Some(Mood::Relaxado));
            assert_eq!(meta.emoji, "😌");
            assert_eq!(
                meta.gradient.css(),
                "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)"
            );
        }
    }

    #[test]
    fn test_accented_label() {
        assert_eq!(Mood::parse("Nostálgico"), Some(Mood::Nostalgico));
        assert_eq!(mood_meta(Some("nostálgico")).emoji, "💭");
    }

    #[test]
    fn test_unknown_mood_keeps_label() {
        let meta = mood_meta(Some("  Cansado "));
        assert_eq!(meta.mood, None);
        assert_eq!(meta.label, "cansado");
        assert_eq!(meta.emoji, "📚");
        assert_eq!(meta.gradient, DEFAULT_GRADIENT);
    }

    #[test]
    fn test_blank_mood_is_default() {
        assert_eq!(mood_meta(None).label, "default");
        assert_eq!(mood_meta(Some("   ")).label, "default");
    }

    #[test]
    fn test_every_mood_has_distinct_emoji() {
        let mut emojis: Vec<&str> = Mood::ALL.iter().map(|m| m.emoji()).collect();
        emojis.sort_unstable();
        emojis.dedup();
        assert_eq!(emojis.len(), Mood::ALL.len());
    }
}
