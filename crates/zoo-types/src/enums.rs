//! Enumeration types for the petting zoo.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// The kind of pet a service hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Species {
    /// The chill turtle. Slow to react, retreats into its shell under stress.
    Turtle,
    /// The emotional octopus. Changes colour with its feelings, inks when scared.
    Octopus,
    /// The chaos dragon. Moody, rage-prone, breathes fire.
    Dragon,
    /// The baby dino. Playful, naps, learns tricks.
    Dino,
    /// The bouncy bunny. The simplest pet; the only one that can be reset.
    Bunny,
}

impl Species {
    /// Every species, in display order.
    pub const ALL: [Self; 5] = [
        Self::Turtle,
        Self::Octopus,
        Self::Dragon,
        Self::Dino,
        Self::Bunny,
    ];

    /// Lowercase name used in config files and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::Octopus => "octopus",
            Self::Dragon => "dragon",
            Self::Dino => "dino",
            Self::Bunny => "bunny",
        }
    }

    /// Parse a species name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One user interaction with a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Stroke the pet. Usually raises happiness.
    Pet,
    /// Give the pet food. Raises energy.
    Feed,
    /// Poke the pet. Raises chaos, lowers happiness.
    Poke,
    /// Sing to the pet. Lowers chaos, may put it to sleep.
    Sing,
    /// Send the pet a free-text message.
    Message,
}

impl Action {
    /// Every action in the vocabulary.
    pub const ALL: [Self; 5] = [
        Self::Pet,
        Self::Feed,
        Self::Poke,
        Self::Sing,
        Self::Message,
    ];

    /// Lowercase verb as sent by clients.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::Feed => "feed",
            Self::Poke => "poke",
            Self::Sing => "sing",
            Self::Message => "message",
        }
    }

    /// Parse a client-supplied verb, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside the vocabulary.
    pub fn parse(verb: &str) -> Option<Self> {
        let verb = verb.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(verb))
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Feeling (octopus)
// ---------------------------------------------------------------------------

/// The octopus' momentary emotion. Drives its skin colour and thoughts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Feeling {
    /// Delighted, usually after petting.
    Happy,
    /// Lonely or hurt.
    Sad,
    /// Investigating something.
    Curious,
    /// Startled, usually after a poke.
    Nervous,
    /// Thrilled, usually at feeding time.
    Excited,
    /// Pondering.
    Thoughtful,
    /// Overwhelmed past its limit.
    Furious,
    /// Soothed by singing.
    Calm,
    /// Mildly pleased and wiggly.
    Playful,
}

impl Feeling {
    /// Skin colour the octopus shifts to when it feels this way.
    pub const fn colour(self) -> &'static str {
        match self {
            Self::Happy => "Yellow",
            Self::Sad => "Blue",
            Self::Curious => "Green",
            Self::Nervous => "Grey",
            Self::Excited => "Orange",
            Self::Thoughtful => "Purple",
            Self::Furious => "Red",
            Self::Calm => "Teal",
            Self::Playful => "Pink",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_parse_is_case_insensitive() {
        assert_eq!(Action::parse("FEED"), Some(Action::Feed));
        assert_eq!(Action::parse("  Poke "), Some(Action::Poke));
        assert_eq!(Action::parse("dance"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn species_parse_round_trips_names() {
        for species in Species::ALL {
            assert_eq!(Species::from_name(species.as_str()), Some(species));
        }
        assert_eq!(Species::from_name("Dragon"), Some(Species::Dragon));
        assert_eq!(Species::from_name("cat"), None);
    }

    #[test]
    fn species_serializes_lowercase() {
        let json = serde_json::to_string(&Species::Octopus).ok();
        assert_eq!(json.as_deref(), Some("\"octopus\""));
    }

    #[test]
    fn feelings_map_to_distinct_colours() {
        let feelings = [
            Feeling::Happy,
            Feeling::Sad,
            Feeling::Curious,
            Feeling::Nervous,
            Feeling::Excited,
            Feeling::Thoughtful,
            Feeling::Furious,
            Feeling::Calm,
            Feeling::Playful,
        ];
        let colours: std::collections::BTreeSet<&str> =
            feelings.iter().map(|f| f.colour()).collect();
        assert_eq!(colours.len(), feelings.len());
    }
}
