//! Shared domain models.

use serde::{Deserialize, Serialize};

/// Which flavour of the scroller is running.
///
/// `Simple` tracks names only. `Rich` adds a colour per cat plus the
/// one-way alive flag and the kill control that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Names only; add form is cleared after every render.
    Simple,
    /// Name, colour and alive flag.
    #[default]
    Rich,
}

impl Variant {
    /// Whether records carry a colour and the add form asks for one.
    pub fn has_colour(self) -> bool {
        matches!(self, Variant::Rich)
    }

    /// Whether the alive/dead flag and the kill control are shown.
    pub fn has_vitality(self) -> bool {
        matches!(self, Variant::Rich)
    }
}

/// A single record in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cat {
    name: String,
    colour: Option<String>,
    alive: bool,
}

impl Cat {
    /// Create a living cat.
    pub fn new(name: impl Into<String>, colour: Option<String>) -> Self {
        Self {
            name: name.into(),
            colour,
            alive: true,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colour, if the record was created with one.
    pub fn colour(&self) -> Option<&str> {
        self.colour.as_deref()
    }

    /// `false` once the cat has been killed.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }
}

const DEFAULT_SEED: [(&str, &str); 5] = [
    ("Gary", "Ginger"),
    ("Sally", "Black"),
    ("Harry", "White"),
    ("Tina", "Tabby"),
    ("Phil", "Tabby"),
];

/// Built-in records the store starts with when no seed is configured.
pub fn default_seed(variant: Variant) -> Vec<Cat> {
    DEFAULT_SEED
        .iter()
        .map(|(name, colour)| {
            let colour = variant.has_colour().then(|| colour.to_string());
            Cat::new(*name, colour)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_matches_variant() {
        let rich = default_seed(Variant::Rich);
        assert_eq!(rich.len(), 5);
        assert_eq!(rich[0].name(), "Gary");
        assert_eq!(rich[0].colour(), Some("Ginger"));
        assert!(rich.iter().all(Cat::is_alive));

        let simple = default_seed(Variant::Simple);
        assert_eq!(simple.len(), 5);
        assert_eq!(simple[4].name(), "Phil");
        assert!(simple.iter().all(|cat| cat.colour().is_none()));
    }

    #[test]
    fn kill_is_one_way() {
        let mut cat = Cat::new("Tina", Some("Tabby".to_string()));
        cat.kill();
        cat.kill();
        assert!(!cat.is_alive());
    }
}
