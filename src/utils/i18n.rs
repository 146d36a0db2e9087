use crate::config::DEFAULT_LOCALE;
use tracing::warn;

/// Locales with translated boundary strings
pub fn available_locales() -> Vec<&'static str> {
    available_locales!()
}

/// Pick `requested` if it has translations, otherwise the default locale
pub fn resolve_locale(requested: &str) -> String {
    if available_locales().iter().any(|locale| *locale == requested) {
        requested.to_string()
    } else {
        warn!("No translations for locale '{}', using '{}'", requested, DEFAULT_LOCALE);
        DEFAULT_LOCALE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale("cs"), "cs");
        assert_eq!(resolve_locale("en"), "en");
        assert_eq!(resolve_locale("xx-YY"), DEFAULT_LOCALE);
    }
}
