//! Interactive prompt used when tldw is started without a subcommand.

use crate::creativity::CreativityLevel;
use crate::input::validate_url;
use crate::speech::Voice;
use crate::workflow::InteractionOptions;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

/// Ask for a URL and the interaction options, starting from `defaults`.
///
/// Returns `None` when the entered URL is malformed: the interaction stops there.
pub fn prompt(defaults: InteractionOptions) -> anyhow::Result<Option<(String, InteractionOptions)>> {
    let theme = ColorfulTheme::default();

    let url: String = Input::with_theme(&theme)
        .with_prompt("Enter a website, a PDF or a YouTube video URL")
        .interact_text()?;
    if validate_url(&url).is_err() {
        return Ok(None);
    }

    let enable_tts = Confirm::with_theme(&theme)
        .with_prompt("Enable text-to-speech?")
        .default(defaults.voice.is_some())
        .interact()?;

    let voice = if enable_tts {
        let names: Vec<&str> = Voice::ALL.iter().map(|v| v.as_str()).collect();
        let current = defaults.voice.unwrap_or_default();
        let default_index = Voice::ALL.iter().position(|v| *v == current).unwrap_or(0);
        let index = Select::with_theme(&theme)
            .with_prompt("Choose a voice")
            .items(&names)
            .default(default_index)
            .interact()?;
        Some(Voice::ALL[index])
    } else {
        None
    };

    let creativity: CreativityLevel = Input::with_theme(&theme)
        .with_prompt(format!("Creativity (0-{})", CreativityLevel::MAX))
        .default(defaults.creativity)
        .interact_text()?;

    Ok(Some((url, InteractionOptions { creativity, voice })))
}
