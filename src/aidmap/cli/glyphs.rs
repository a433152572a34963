//! Marker glyphs per activity category, mirroring the Humanitarian
//! Font icon set the map renderer uses.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub struct Glyph {
    pub icon: &'static str,
    rgb: (u8, u8, u8),
}

impl Glyph {
    pub fn style(&self) -> Style {
        let (r, g, b) = self.rgb;
        Style::new().color256(rgb_to_ansi256(r, g, b))
    }
}

pub static GLYPHS: Lazy<HashMap<&'static str, Glyph>> = Lazy::new(|| {
    HashMap::from([
        (
            "CASH",
            Glyph {
                icon: "ocha-sector-cash",
                rgb: (0xa4, 0x86, 0x58),
            },
        ),
        (
            "EDUCATION",
            Glyph {
                icon: "ocha-sector-education",
                rgb: (0xc0, 0x00, 0x00),
            },
        ),
        (
            "FOOD",
            Glyph {
                icon: "ocha-sector-foodsecurity",
                rgb: (0x00, 0x66, 0x00),
            },
        ),
        (
            "HEALTH",
            Glyph {
                icon: "ocha-sector-health",
                rgb: (0x08, 0xa1, 0xd9),
            },
        ),
        (
            "NFI",
            Glyph {
                icon: "ocha-item-reliefgood",
                rgb: (0xf9, 0x6a, 0x1b),
            },
        ),
        (
            "PROTECTION",
            Glyph {
                icon: "ocha-sector-protection",
                rgb: (0x1f, 0x49, 0x7d),
            },
        ),
        (
            "SHELTER",
            Glyph {
                icon: "ocha-sector-shelter",
                rgb: (0x98, 0x9a, 0xac),
            },
        ),
        (
            "WASH",
            Glyph {
                icon: "ocha-sector-wash",
                rgb: (0x70, 0x30, 0xa0),
            },
        ),
    ])
});

/// Style for a category tag; unknown categories print unstyled.
pub fn style_for(category: &str) -> Style {
    GLYPHS
        .get(category)
        .map(|g| g.style())
        .unwrap_or_else(Style::new)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((u16::from(r) - 8) * 24 / 247) as u8;
    }
    let scale = |c: u8| (u16::from(c) * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_an_icon() {
        for key in [
            "CASH",
            "EDUCATION",
            "FOOD",
            "HEALTH",
            "NFI",
            "PROTECTION",
            "SHELTER",
            "WASH",
        ] {
            assert!(GLYPHS.get(key).is_some(), "missing glyph for {}", key);
            assert!(GLYPHS[key].icon.starts_with("ocha-"));
        }
    }

    #[test]
    fn ansi_mapping_stays_in_the_cube() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
        let c = rgb_to_ansi256(0x70, 0x30, 0xa0);
        assert!((16..=231).contains(&c));
    }
}
