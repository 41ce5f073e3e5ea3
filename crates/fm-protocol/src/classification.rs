use serde::{Deserialize, Serialize};

/// Top-scoring intent reported by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredIntent {
    /// Raw label, e.g. `Order.En`. May be outside the known intent table.
    pub label: String,
    /// Confidence score (0.0 - 1.0).
    pub score: f64,
}

/// One extracted span inside a composite entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChild {
    /// Entity role, e.g. `DishBase` or `Filling`.
    pub role: String,
    /// Text extracted for this span.
    pub value: String,
}

/// A group of spans the classifier believes describe one object (one dish).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeEntity {
    #[serde(default)]
    pub children: Vec<EntityChild>,
}

/// Result of classifying one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub top_intent: ScoredIntent,
    #[serde(default)]
    pub composite_entities: Vec<CompositeEntity>,
}

impl Classification {
    /// Classification with no entities.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            top_intent: ScoredIntent {
                label: label.into(),
                score,
            },
            composite_entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: CompositeEntity) -> Self {
        self.composite_entities.push(entity);
        self
    }
}

impl CompositeEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, role: impl Into<String>, value: impl Into<String>) -> Self {
        self.children.push(EntityChild {
            role: role.into(),
            value: value.into(),
        });
        self
    }
}
