//! Color classes and the palette that resolves them

use drift_core::Color;
use serde::{Deserialize, Serialize};

/// Logical color of an entity, resolved through a [`Palette`] at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Primary,
    Secondary,
    Accent,
}

impl ColorClass {
    pub const ALL: [ColorClass; 3] = [ColorClass::Primary, ColorClass::Secondary, ColorClass::Accent];
}

/// Immutable color table handed to the pool and the painter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    /// Connection line color; alpha is scaled by connection strength
    pub line: Color,
    /// Surface fill before each frame; `None` clears to transparent
    pub background: Option<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::from_hex(0x6366f1),
            secondary: Color::from_hex(0x8b5cf6),
            accent: Color::from_hex(0x06b6d4),
            line: Color::from_hex(0x818cf8),
            background: None,
        }
    }
}

impl Palette {
    pub fn resolve(&self, class: ColorClass) -> Color {
        match class {
            ColorClass::Primary => self.primary,
            ColorClass::Secondary => self.secondary,
            ColorClass::Accent => self.accent,
        }
    }

    pub fn background_or_clear(&self) -> Color {
        self.background.unwrap_or(Color::TRANSPARENT)
    }
}
