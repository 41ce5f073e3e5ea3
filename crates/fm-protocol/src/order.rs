use std::fmt;

use serde::{Deserialize, Serialize};

/// One ordered food item: a base (e.g. a pancake) plus its fillings.
///
/// Displays as `base (filling1, filling2)`; a dish with no fillings keeps
/// the empty parentheses, `base ()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Name of the underlying item.
    pub base: String,
    /// Fillings in the order they were extracted from the message.
    #[serde(default)]
    pub fillings: Vec<String>,
}

impl Dish {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            fillings: Vec::new(),
        }
    }

    pub fn with_fillings<I, S>(mut self, fillings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fillings.extend(fillings.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.base, self.fillings.join(", "))
    }
}

/// The accumulating cart for one conversation session.
///
/// Grows only through [`Order::add_dishes`] and is emptied only through
/// [`Order::take_all`] (checkout).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    dishes: Vec<Dish>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    /// Append dishes, preserving their order. Dishes with a blank base are skipped.
    pub fn add_dishes(&mut self, dishes: impl IntoIterator<Item = Dish>) {
        self.dishes
            .extend(dishes.into_iter().filter(|d| !d.base.trim().is_empty()));
    }

    /// Remove and return every dish, leaving the order empty.
    pub fn take_all(&mut self) -> Vec<Dish> {
        std::mem::take(&mut self.dishes)
    }
}
