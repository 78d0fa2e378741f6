//! Toolkit-agnostic description of what the window should show.

use crate::{models::Variant, store::CatStore};

/// Alive/dead state of the displayed cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    /// Drawn with the normal foreground.
    Alive,
    /// Drawn in the mourning tint with a skull.
    Dead,
}

impl Vitality {
    /// Glyph shown in the indicator slot.
    pub fn glyph(self) -> &'static str {
        match self {
            Vitality::Alive => "☻",
            Vitality::Dead => "☠",
        }
    }

    /// RGB tint applied to every record label.
    pub fn tint(self) -> (u8, u8, u8) {
        match self {
            Vitality::Alive => (255, 255, 255),
            Vitality::Dead => (255, 170, 170),
        }
    }
}

/// Everything a frontend needs to overwrite every displayed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatView {
    /// One-based position of the current cat.
    pub position: String,
    /// Current cat's name.
    pub name: String,
    /// Current cat's colour. `None` in the simple variant.
    pub colour: Option<String>,
    /// Alive/dead indicator. `None` in the simple variant.
    pub vitality: Option<Vitality>,
    /// Previous control accepts activation.
    pub previous_enabled: bool,
    /// Next control accepts activation.
    pub next_enabled: bool,
    /// Kill control accepts activation. Always `false` without vitality.
    pub kill_enabled: bool,
    /// Frontend must empty the add form after applying this view.
    pub clear_inputs: bool,
}

impl CatView {
    /// Tint for the record labels, if any.
    pub fn tint(&self) -> Option<(u8, u8, u8)> {
        self.vitality.map(Vitality::tint)
    }
}

/// Derive the full view from store state.
pub fn render(store: &CatStore, variant: Variant) -> CatView {
    let cat = store.current();
    let vitality = variant.has_vitality().then(|| {
        if cat.is_alive() {
            Vitality::Alive
        } else {
            Vitality::Dead
        }
    });

    CatView {
        position: (store.cursor() + 1).to_string(),
        name: cat.name().to_string(),
        colour: if variant.has_colour() {
            Some(cat.colour().unwrap_or_default().to_string())
        } else {
            None
        },
        vitality,
        previous_enabled: !store.at_first(),
        next_enabled: !store.at_last(),
        kill_enabled: vitality == Some(Vitality::Alive),
        clear_inputs: variant == Variant::Simple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_disables_previous() {
        let store = CatStore::seeded(Variant::Rich);
        let view = render(&store, Variant::Rich);
        assert_eq!(view.position, "1");
        assert_eq!(view.name, "Gary");
        assert_eq!(view.colour.as_deref(), Some("Ginger"));
        assert_eq!(view.vitality, Some(Vitality::Alive));
        assert!(!view.previous_enabled);
        assert!(view.next_enabled);
        assert!(view.kill_enabled);
        assert!(!view.clear_inputs);
    }

    #[test]
    fn last_record_disables_next() {
        let mut store = CatStore::seeded(Variant::Rich);
        for _ in 0..4 {
            store.next();
        }
        let view = render(&store, Variant::Rich);
        assert_eq!(view.position, "5");
        assert!(view.previous_enabled);
        assert!(!view.next_enabled);
    }

    #[test]
    fn dead_cat_switches_indicator_and_disables_kill() {
        let mut store = CatStore::seeded(Variant::Rich);
        store.kill();
        let view = render(&store, Variant::Rich);
        assert_eq!(view.vitality, Some(Vitality::Dead));
        assert_eq!(view.vitality.map(Vitality::glyph), Some("☠"));
        assert_eq!(view.tint(), Some((255, 170, 170)));
        assert!(!view.kill_enabled);
    }

    #[test]
    fn simple_variant_hides_colour_and_vitality() {
        let store = CatStore::seeded(Variant::Simple);
        let view = render(&store, Variant::Simple);
        assert_eq!(view.colour, None);
        assert_eq!(view.vitality, None);
        assert_eq!(view.tint(), None);
        assert!(!view.kill_enabled);
        assert!(view.clear_inputs);
    }

    #[test]
    fn render_depends_only_on_store_state() {
        let mut left = CatStore::seeded(Variant::Rich);
        let mut right = CatStore::seeded(Variant::Rich);
        left.next();
        left.add("Whiskers", Some("Grey".to_string()));
        right.add("Whiskers", Some("Grey".to_string()));
        assert_eq!(left, right);
        assert_eq!(render(&left, Variant::Rich), render(&right, Variant::Rich));
        assert_eq!(render(&left, Variant::Rich), render(&left, Variant::Rich));
    }

    #[test]
    fn single_record_store_disables_both_directions() {
        let store = CatStore::new(vec![crate::models::Cat::new("Solo", None)])
            .expect("non-empty seed");
        let view = render(&store, Variant::Simple);
        assert!(!view.previous_enabled);
        assert!(!view.next_enabled);
    }
}
