//! Output-language selection for generated text.

/// Maps a frontend language code to the language name used in prompts.
/// Unknown codes fall back to English.
pub fn prompt_language(code: &str) -> &'static str {
    match code {
        "en" => "English",
        "tr" => "Turkish",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "hi" => "Hindi",
        "zh" => "Chinese",
        "it" => "Italian",
        _ => "English",
    }
}
