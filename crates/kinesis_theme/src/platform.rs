//! System color scheme detection
//!
//! Headless hosts have no media query to ask, so the environment is
//! consulted instead:
//!
//! 1. `KINESIS_COLOR_SCHEME` set to `light` or `dark`
//! 2. `GTK_THEME` naming a dark variant (`Adwaita:dark`, `Yaru-dark`)
//! 3. `COLORFGBG` from the terminal (`"15;0"` is light text on black)

use crate::preference::ThemePreference;

/// Detect the environment's preferred scheme, if it reports one
pub fn detect_system_color_scheme() -> Option<ThemePreference> {
    let scheme = scheme_from_env(|name| std::env::var(name).ok());
    tracing::debug!(?scheme, "detected system color scheme");
    scheme
}

/// Detection over an arbitrary variable lookup
pub fn scheme_from_env<F>(var: F) -> Option<ThemePreference>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(explicit) = var("KINESIS_COLOR_SCHEME") {
        if let Ok(pref) = explicit.to_ascii_lowercase().parse() {
            return Some(pref);
        }
    }

    if let Some(gtk) = var("GTK_THEME") {
        let gtk = gtk.to_ascii_lowercase();
        if gtk.ends_with(":dark") || gtk.ends_with("-dark") {
            return Some(ThemePreference::Dark);
        }
    }

    let colorfgbg = var("COLORFGBG")?;
    let background: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    // ANSI 0-6 and 8 are dark backgrounds; 7 and 9-15 are light
    Some(if background < 7 || background == 8 {
        ThemePreference::Dark
    } else {
        ThemePreference::Light
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn explicit_override_wins() {
        let lookup = env(&[("KINESIS_COLOR_SCHEME", "Dark"), ("COLORFGBG", "0;15")]);
        assert_eq!(scheme_from_env(lookup), Some(ThemePreference::Dark));
    }

    #[test]
    fn gtk_dark_variant() {
        assert_eq!(
            scheme_from_env(env(&[("GTK_THEME", "Adwaita:dark")])),
            Some(ThemePreference::Dark)
        );
        assert_eq!(scheme_from_env(env(&[("GTK_THEME", "Adwaita")])), None);
    }

    #[test]
    fn terminal_background() {
        assert_eq!(
            scheme_from_env(env(&[("COLORFGBG", "15;0")])),
            Some(ThemePreference::Dark)
        );
        assert_eq!(
            scheme_from_env(env(&[("COLORFGBG", "0;default;15")])),
            Some(ThemePreference::Light)
        );
        assert_eq!(scheme_from_env(env(&[("COLORFGBG", "garbage")])), None);
    }

    #[test]
    fn nothing_reported() {
        assert_eq!(scheme_from_env(env(&[])), None);
    }
}
