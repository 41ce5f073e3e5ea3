use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reply language carried by an intent label suffix (`.En` / `.Ru`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    En,
    Ru,
}

/// What the user wants the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Classifier fallback: the message matched nothing.
    None,
    Greeting,
    ShowMenu,
    ShowOrder,
    Checkout,
    Order,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::None,
        Action::Greeting,
        Action::ShowMenu,
        Action::ShowOrder,
        Action::Checkout,
        Action::Order,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::None => "None",
            Action::Greeting => "Greeting",
            Action::ShowMenu => "ShowMenu",
            Action::ShowOrder => "ShowOrder",
            Action::Checkout => "Checkout",
            Action::Order => "Order",
        }
    }

    /// Whether a matched intent with this action may change the order.
    pub fn mutates_order(self) -> bool {
        matches!(self, Action::Order | Action::Checkout)
    }
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "En",
            Language::Ru => "Ru",
        }
    }
}

/// A recognized intent label, e.g. `ShowMenu.Ru`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub action: Action,
    pub language: Language,
}

impl Intent {
    pub fn new(action: Action, language: Language) -> Self {
        Self { action, language }
    }
}

/// Error for labels outside the fixed intent table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized intent label: {0:?}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    /// Parses `<Action>.<En|Ru>`. The bare label `None` is the English fallback.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        if label == "None" {
            return Ok(Intent::new(Action::None, Language::En));
        }

        let unknown = || UnknownIntent(label.to_string());
        let (action, language) = label.split_once('.').ok_or_else(unknown)?;

        let action = Action::ALL
            .into_iter()
            .find(|a| a.as_str() == action)
            .ok_or_else(unknown)?;
        let language = match language {
            "En" => Language::En,
            "Ru" => Language::Ru,
            _ => return Err(unknown()),
        };

        Ok(Intent::new(action, language))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.action.as_str(), self.language.as_str())
    }
}
