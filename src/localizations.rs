use std::collections::HashMap;

use unic_langid::{langid, LanguageIdentifier};

const FALLBACK: LanguageIdentifier = langid!("en-US");

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<LanguageIdentifier, Translations>,
    current_lang: LanguageIdentifier,
}

impl Default for Localizations {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizations {
    pub fn new() -> Self {
        let mut translations = HashMap::new();

        let mut en = Translations::new();
        en.insert("app-title", "QuickFile - Download any Content in One Place");
        en.insert("url-label", "Paste video/audio link:");
        en.insert("url-placeholder", "https://...");
        en.insert("kind-label", "Download type:");
        en.insert("kind-video", "Video");
        en.insert("kind-audio", "Audio");
        en.insert("format-label", "Format:");
        en.insert("quality-label", "Quality:");
        en.insert("download-button", "Download");
        en.insert("remember-folder", "Always use this folder for downloads");
        en.insert("pick-folder-title", "Select Download Folder");
        en.insert("status-ready", "Ready");
        en.insert("status-downloading", "Downloading...");
        en.insert("status-complete", "Download finished!");
        en.insert("saved-to", "Saved to:");
        en.insert("done-title", "Done");
        en.insert("error-title", "Error");
        en.insert("error-no-url", "Please enter a URL.");
        en.insert("error-no-folder", "No download folder selected.");
        en.insert("download-failed", "Download failed:");
        en.insert("remember-title", "Default Folder");
        en.insert("remember-question", "Do you want to always download to this folder?");
        en.insert("footer", "© 2025 Quicklink | All Right Reserved");
        translations.insert(FALLBACK, en);

        let mut es = Translations::new();
        es.insert("app-title", "QuickFile - Descarga cualquier contenido en un solo lugar");
        es.insert("url-label", "Pega el enlace de video/audio:");
        es.insert("kind-label", "Tipo de descarga:");
        es.insert("kind-video", "Video");
        es.insert("kind-audio", "Audio");
        es.insert("format-label", "Formato:");
        es.insert("quality-label", "Calidad:");
        es.insert("download-button", "Descargar");
        es.insert("remember-folder", "Usar siempre esta carpeta para las descargas");
        es.insert("pick-folder-title", "Seleccionar carpeta de descarga");
        es.insert("status-ready", "Listo");
        es.insert("status-downloading", "Descargando...");
        es.insert("status-complete", "¡Descarga completada!");
        es.insert("saved-to", "Guardado en:");
        es.insert("done-title", "Listo");
        es.insert("error-title", "Error");
        es.insert("error-no-url", "Por favor ingrese una URL.");
        es.insert("error-no-folder", "No se seleccionó ninguna carpeta.");
        es.insert("download-failed", "La descarga falló:");
        es.insert("remember-title", "Carpeta predeterminada");
        es.insert("remember-question", "¿Desea descargar siempre en esta carpeta?");
        translations.insert(langid!("es-ES"), es);

        Self {
            translations,
            current_lang: FALLBACK,
        }
    }

    /// Picks the first requested language with translations.
    pub fn with_requested(requested: &[LanguageIdentifier]) -> Self {
        let mut localizer = Self::new();
        for lang in requested {
            if localizer.select(lang) {
                break;
            }
        }
        log::debug!("UI language: {}", localizer.current_lang);
        localizer
    }

    /// Returns the string for `key`, falling back to English and then to the key itself.
    pub fn text(&self, key: &str) -> String {
        self.translations
            .get(&self.current_lang)
            .and_then(|t| t.lookup(key))
            .or_else(|| self.translations.get(&FALLBACK).and_then(|t| t.lookup(key)))
            .unwrap_or(key)
            .to_string()
    }

    /// Selects `lang`, or another region of the same language. Returns false
    /// and keeps the current language when neither exists.
    pub fn select(&mut self, lang: &LanguageIdentifier) -> bool {
        if self.translations.contains_key(lang) {
            self.current_lang = lang.clone();
            return true;
        }

        let same_language = self
            .translations
            .keys()
            .find(|key| key.language == lang.language)
            .cloned();
        match same_language {
            Some(key) => {
                self.current_lang = key;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_then_key() {
        let mut l = Localizations::new();
        assert!(l.select(&langid!("es-MX")));
        assert_eq!(l.current_lang, langid!("es-ES"));
        assert_eq!(l.text("download-button"), "Descargar");
        assert_eq!(l.text("url-placeholder"), "https://...");
        assert_eq!(l.text("no-such-key"), "no-such-key");
    }

    #[test]
    fn unknown_languages_keep_english() {
        let l = Localizations::with_requested(&[langid!("ja-JP"), langid!("de")]);
        assert_eq!(l.current_lang, langid!("en-US"));
        assert_eq!(l.text("status-ready"), "Ready");
    }
}
