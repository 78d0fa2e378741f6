//! Maps interaction events onto store mutations followed by a re-render.

use tracing::debug;

use crate::{
    models::Variant,
    store::CatStore,
    view::{render, CatView},
};

/// Something the user asked the window to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the following cat.
    Next,
    /// Show the preceding cat.
    Previous,
    /// Kill the current cat.
    Kill,
    /// Submit the add form.
    Add {
        /// Raw name input.
        name: String,
        /// Raw colour input; ignored by the simple variant.
        colour: Option<String>,
    },
}

/// What [`ViewController::dispatch`] did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Store mutated and view refreshed.
    Rendered,
    /// A cat was added; the frontend clears the form and refocuses the name input.
    Added,
    /// Nothing happened.
    Ignored,
}

/// Owns the store and the last rendered view.
#[derive(Debug, Clone)]
pub struct ViewController {
    store: CatStore,
    variant: Variant,
    view: CatView,
}

impl ViewController {
    /// Take ownership of `store` and render its initial state.
    pub fn new(store: CatStore, variant: Variant) -> Self {
        let view = render(&store, variant);
        Self {
            store,
            variant,
            view,
        }
    }

    /// Flavour this controller was configured with.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Read-only access to the model.
    pub fn store(&self) -> &CatStore {
        &self.store
    }

    /// Most recent render output.
    pub fn view(&self) -> &CatView {
        &self.view
    }

    /// Apply one action: at most one store mutation, then one full render.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let outcome = match action {
            Action::Next => {
                self.store.next();
                Dispatch::Rendered
            }
            Action::Previous => {
                self.store.previous();
                Dispatch::Rendered
            }
            Action::Kill if self.variant.has_vitality() => {
                self.store.kill();
                Dispatch::Rendered
            }
            Action::Kill => return Dispatch::Ignored,
            Action::Add { name, colour } => {
                let Some((name, colour)) = accept_submission(self.variant, name, colour) else {
                    return Dispatch::Ignored;
                };
                self.store.add(name, colour);
                Dispatch::Added
            }
        };

        self.render();
        debug!(?outcome, cursor = self.store.cursor(), "Action dispatched");
        outcome
    }

    fn render(&mut self) {
        self.view = render(&self.store, self.variant);
    }
}

/// Reject form input when a required field is blank; accepted input is kept as typed.
fn accept_submission(
    variant: Variant,
    name: String,
    colour: Option<String>,
) -> Option<(String, Option<String>)> {
    if is_blank(&name) {
        return None;
    }
    if !variant.has_colour() {
        return Some((name, None));
    }
    let colour = colour.filter(|value| !is_blank(value))?;
    Some((name, Some(colour)))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
