//! Configuration for the traversal engine.

use serde::{Deserialize, Serialize};
use teller_core::Ending;

/// Reply texts and the reset keyword.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Input that clears the session from any state. Matched exactly and
    /// checked before option labels.
    pub reset_keyword: String,
    /// Shown with the story list on `/start`.
    pub greeting: String,
    /// Acknowledges a reset.
    pub farewell: String,
    /// Closing message for `won` endings.
    pub won_message: String,
    /// Closing message for `death` endings.
    pub death_message: String,
    /// Closing message for any other ending.
    pub ending_message: String,
    /// Acknowledges a story choice above its first page. `{story}` is
    /// replaced with the title. Off when unset.
    pub story_chosen: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reset_keyword: "Done".to_string(),
            greeting: "Hi! My name is the story teller.".to_string(),
            farewell: "Until next time!".to_string(),
            won_message: "Well done! Until next time!".to_string(),
            death_message: "Better luck next time, I hope!".to_string(),
            ending_message: "The End. Until next time!".to_string(),
            story_chosen: None,
        }
    }
}

impl EngineConfig {
    /// Set the reset keyword.
    pub fn with_reset_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.reset_keyword = keyword.into();
        self
    }

    /// Set the greeting.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Set the reset acknowledgement.
    pub fn with_farewell(mut self, farewell: impl Into<String>) -> Self {
        self.farewell = farewell.into();
        self
    }

    /// Set the acknowledgement shown when a story is chosen.
    pub fn with_story_chosen(mut self, template: impl Into<String>) -> Self {
        self.story_chosen = Some(template.into());
        self
    }

    /// Acknowledgement for choosing `story`, if one is configured.
    pub fn chosen_message(&self, story: &str) -> Option<String> {
        self.story_chosen
            .as_ref()
            .map(|template| template.replace("{story}", story))
    }

    /// Whether `input` is the reset keyword.
    pub fn is_reset(&self, input: &str) -> bool {
        input == self.reset_keyword
    }

    /// Closing message for an ending.
    pub fn ending_message(&self, ending: &Ending) -> &str {
        match ending {
            Ending::Won => &self.won_message,
            Ending::Death => &self.death_message,
            Ending::Other(_) => &self.ending_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.reset_keyword, "Done");
        assert!(cfg.is_reset("Done"));
        assert!(!cfg.is_reset("done"));
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_reset_keyword("Stop")
            .with_greeting("Welcome.")
            .with_farewell("Bye.");
        assert!(cfg.is_reset("Stop"));
        assert!(!cfg.is_reset("Done"));
        assert_eq!(cfg.greeting, "Welcome.");
        assert_eq!(cfg.farewell, "Bye.");
    }

    #[test]
    fn ending_messages() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.ending_message(&Ending::Won), "Well done! Until next time!");
        assert_eq!(
            cfg.ending_message(&Ending::Death),
            "Better luck next time, I hope!"
        );
        assert_eq!(
            cfg.ending_message(&Ending::Other("escaped".to_string())),
            cfg.ending_message
        );
    }

    #[test]
    fn story_chosen_template() {
        assert_eq!(EngineConfig::default().chosen_message("The Tower"), None);

        let cfg = EngineConfig::default().with_story_chosen("You have chosen {story}.");
        assert_eq!(
            cfg.chosen_message("The Tower").as_deref(),
            Some("You have chosen The Tower.")
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"reset_keyword": "Quit"}"#).unwrap();
        assert_eq!(cfg.reset_keyword, "Quit");
        assert_eq!(cfg.farewell, EngineConfig::default().farewell);
    }
}
