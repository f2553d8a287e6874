//! Color tokens for the light and dark palettes

use crate::preference::ThemePreference;
use kinesis_core::Color;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    Background,
    Foreground,
    MutedForeground,
    Card,
    Primary,
    PrimaryForeground,
    Secondary,
    Accent,
    Border,
}

impl ColorToken {
    pub const ALL: [ColorToken; 9] = [
        ColorToken::Background,
        ColorToken::Foreground,
        ColorToken::MutedForeground,
        ColorToken::Card,
        ColorToken::Primary,
        ColorToken::PrimaryForeground,
        ColorToken::Secondary,
        ColorToken::Accent,
        ColorToken::Border,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Background => "background",
            ColorToken::Foreground => "foreground",
            ColorToken::MutedForeground => "muted-foreground",
            ColorToken::Card => "card",
            ColorToken::Primary => "primary",
            ColorToken::PrimaryForeground => "primary-foreground",
            ColorToken::Secondary => "secondary",
            ColorToken::Accent => "accent",
            ColorToken::Border => "border",
        }
    }
}

/// Complete set of semantic color tokens
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTokens {
    pub background: Color,
    pub foreground: Color,
    pub muted_foreground: Color,
    pub card: Color,
    pub primary: Color,
    pub primary_foreground: Color,
    pub secondary: Color,
    pub accent: Color,
    pub border: Color,
}

impl ColorTokens {
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::from_hex(0x0F172A),
            muted_foreground: Color::from_hex(0x64748B),
            card: Color::from_hex(0xF8FAFC),
            primary: Color::from_hex(0x0EA5A4),
            primary_foreground: Color::WHITE,
            secondary: Color::from_hex(0xF1F5F9),
            accent: Color::from_hex(0x14B8A6),
            border: Color::from_hex(0xE2E8F0),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::from_hex(0x0A0A0A),
            foreground: Color::from_hex(0xF8FAFC),
            muted_foreground: Color::from_hex(0x94A3B8),
            card: Color::from_hex(0x141414),
            primary: Color::from_hex(0x2DD4BF),
            primary_foreground: Color::from_hex(0x0A0A0A),
            secondary: Color::from_hex(0x1E293B),
            accent: Color::from_hex(0x5EEAD4),
            border: Color::from_hex(0x27272A),
        }
    }

    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Foreground => self.foreground,
            ColorToken::MutedForeground => self.muted_foreground,
            ColorToken::Card => self.card,
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryForeground => self.primary_foreground,
            ColorToken::Secondary => self.secondary,
            ColorToken::Accent => self.accent,
            ColorToken::Border => self.border,
        }
    }

    /// Interpolate every token
    pub fn lerp(from: &ColorTokens, to: &ColorTokens, t: f32) -> ColorTokens {
        let mix = |a: Color, b: Color| Color::lerp(a, b, t);
        ColorTokens {
            background: mix(from.background, to.background),
            foreground: mix(from.foreground, to.foreground),
            muted_foreground: mix(from.muted_foreground, to.muted_foreground),
            card: mix(from.card, to.card),
            primary: mix(from.primary, to.primary),
            primary_foreground: mix(from.primary_foreground, to.primary_foreground),
            secondary: mix(from.secondary, to.secondary),
            accent: mix(from.accent, to.accent),
            border: mix(from.border, to.border),
        }
    }
}

/// Cross-fade between two palettes after a theme switch
#[derive(Clone, Debug)]
pub struct ThemeTransition {
    from: ColorTokens,
    to: ColorTokens,
    duration_ms: u32,
    elapsed_ms: f32,
}

impl ThemeTransition {
    /// Page background transition length
    pub const DEFAULT_DURATION_MS: u32 = 300;

    pub fn new(from: ColorTokens, to: ColorTokens, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Settled on `tokens` with nothing to animate
    pub fn settled(tokens: ColorTokens) -> Self {
        Self::new(tokens.clone(), tokens, 0)
    }

    /// Restart towards `to` from whatever is currently displayed
    pub fn retarget(&mut self, to: ColorTokens, duration_ms: u32) {
        self.from = self.current();
        self.to = to;
        self.duration_ms = duration_ms;
        self.elapsed_ms = 0.0;
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms as f32);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms as f32
    }

    pub fn current(&self) -> ColorTokens {
        if self.is_done() {
            return self.to.clone();
        }
        let t = self.elapsed_ms / self.duration_ms as f32;
        ColorTokens::lerp(&self.from, &self.to, t)
    }

    pub fn target(&self) -> &ColorTokens {
        &self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_on_every_surface_token() {
        let light = ColorTokens::light();
        let dark = ColorTokens::dark();
        for token in [ColorToken::Background, ColorToken::Foreground, ColorToken::Card] {
            assert_ne!(light.get(token), dark.get(token), "{}", token.name());
        }
    }

    #[test]
    fn transition_cross_fades_then_settles() {
        let mut transition = ThemeTransition::settled(ColorTokens::light());
        assert!(transition.is_done());

        transition.retarget(ColorTokens::dark(), ThemeTransition::DEFAULT_DURATION_MS);
        assert_eq!(transition.current(), ColorTokens::light());

        transition.tick(150.0);
        let mid = transition.current().background;
        assert!(mid.r < 1.0 && mid.r > ColorTokens::dark().background.r);

        transition.tick(1000.0);
        assert!(transition.is_done());
        assert_eq!(transition.current(), ColorTokens::dark());
    }
}
