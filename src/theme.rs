//! Theme catalog: three preset palettes plus user-authored custom themes.

/// The five colors every generated page is styled with, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
}

impl ThemeColors {
    /// Field labels in editor order, matching [`ThemeColors::all`].
    pub const LABELS: &'static [&'static str] =
        &["Primary", "Secondary", "Accent", "Text", "Background"];

    pub fn all(&self) -> [&str; 5] {
        [
            &self.primary,
            &self.secondary,
            &self.accent,
            &self.text,
            &self.background,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
    /// CSS gradient used for the card preview strip.
    pub preview: String,
    pub is_custom: bool,
}

impl ThemeOption {
    /// The fixed preset catalog.
    pub fn catalog() -> Vec<ThemeOption> {
        vec![
            ThemeOption {
                id: "tech-startup".to_string(),
                name: "Tech Startup".to_string(),
                description: "Modern, clean design with bold gradients and tech-focused imagery"
                    .to_string(),
                colors: ThemeColors {
                    primary: "#3B82F6".to_string(),
                    secondary: "#1E40AF".to_string(),
                    accent: "#F59E0B".to_string(),
                    text: "#1F2937".to_string(),
                    background: "#FFFFFF".to_string(),
                },
                preview: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string(),
                is_custom: false,
            },
            ThemeOption {
                id: "portfolio".to_string(),
                name: "Portfolio".to_string(),
                description:
                    "Elegant and artistic with sophisticated typography and creative layouts"
                        .to_string(),
                colors: ThemeColors {
                    primary: "#6366F1".to_string(),
                    secondary: "#4F46E5".to_string(),
                    accent: "#EC4899".to_string(),
                    text: "#374151".to_string(),
                    background: "#F9FAFB".to_string(),
                },
                preview: "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)".to_string(),
                is_custom: false,
            },
            ThemeOption {
                id: "event".to_string(),
                name: "Event".to_string(),
                description: "Vibrant and energetic with dynamic colors and engaging visuals"
                    .to_string(),
                colors: ThemeColors {
                    primary: "#EF4444".to_string(),
                    secondary: "#DC2626".to_string(),
                    accent: "#F97316".to_string(),
                    text: "#111827".to_string(),
                    background: "#FFFFFF".to_string(),
                },
                preview: "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)".to_string(),
                is_custom: false,
            },
        ]
    }

    /// A user-authored theme. The preview gradient is derived from the
    /// primary and secondary colors.
    pub fn custom(name: &str, colors: ThemeColors) -> ThemeOption {
        let name = name.trim();
        let name = if name.is_empty() { "Custom Theme" } else { name };
        let preview = format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            colors.primary, colors.secondary
        );
        ThemeOption {
            id: "custom".to_string(),
            name: name.to_string(),
            description: "Your own hand-picked palette".to_string(),
            colors,
            preview,
            is_custom: true,
        }
    }
}

/// Parse a `#RRGGBB` or `#RGB` hex color into RGB components, for rendering
/// swatches in the terminal. Anything else returns `None`.
pub fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_presets() {
        let themes = ThemeOption::catalog();
        assert_eq!(themes.len(), 3);
        let ids: Vec<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["tech-startup", "portfolio", "event"]);
        assert!(themes.iter().all(|t| !t.is_custom));
    }

    #[test]
    fn custom_theme_derives_preview_from_primary_and_secondary() {
        let colors = ThemeColors {
            primary: "#112233".to_string(),
            secondary: "#445566".to_string(),
            accent: "#778899".to_string(),
            text: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
        };
        let theme = ThemeOption::custom("Midnight", colors);
        assert_eq!(theme.id, "custom");
        assert!(theme.is_custom);
        assert_eq!(
            theme.preview,
            "linear-gradient(135deg, #112233 0%, #445566 100%)"
        );
    }

    #[test]
    fn custom_theme_name_falls_back_when_blank() {
        let colors = ThemeOption::catalog()[0].colors.clone();
        let theme = ThemeOption::custom("   ", colors);
        assert_eq!(theme.name, "Custom Theme");
    }

    #[test]
    fn parse_hex_accepts_long_and_short_forms() {
        assert_eq!(parse_hex("#3B82F6"), Some((0x3B, 0x82, 0xF6)));
        assert_eq!(parse_hex("  #ffffff "), Some((255, 255, 255)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#a1b"), Some((0xAA, 0x11, 0xBB)));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("3B82F6"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }
}
