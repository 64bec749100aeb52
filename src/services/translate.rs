//! Synopsis translation seam.
//!
//! Translation is a collaborator the metadata assembly calls through a
//! trait; the engine itself never talks to a translation backend. The
//! default implementation passes text through unchanged.

/// Translates scraped text into the library language.
pub trait Translator {
    /// Translate `text` into `target_lang` (an ISO 639-1 code). Returns
    /// the input unchanged when the text is already in the target
    /// language or the backend cannot help.
    fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> impl std::future::Future<Output = crate::Result<String>> + Send;
}

/// Identity translator used when language detection is disabled.
#[derive(Debug, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _target_lang: &str) -> crate::Result<String> {
        Ok(text.to_string())
    }
}
