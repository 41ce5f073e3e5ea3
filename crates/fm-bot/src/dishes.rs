//! Dish extraction from the classifier's composite entities.

use fm_protocol::{Classification, CompositeEntity, Dish};

/// Entity role that marks the dish base inside a composite entity.
pub const DISH_BASE_ROLE: &str = "DishBase";

/// Build dishes from every composite entity with exactly one base child.
///
/// Groups with zero or several bases are dropped silently. Every non-base
/// child becomes a filling, in the order it appears in the group.
pub fn parse_dishes(classification: &Classification) -> Vec<Dish> {
    classification
        .composite_entities
        .iter()
        .filter_map(parse_group)
        .collect()
}

fn parse_group(entity: &CompositeEntity) -> Option<Dish> {
    let mut bases = entity
        .children
        .iter()
        .filter(|c| c.role == DISH_BASE_ROLE);
    let base = bases.next()?;
    if base.value.trim().is_empty() {
        return None;
    }
    if bases.next().is_some() {
        tracing::debug!(
            children = entity.children.len(),
            "skipping entity group with several dish bases"
        );
        return None;
    }

    let fillings = entity
        .children
        .iter()
        .filter(|c| c.role != DISH_BASE_ROLE)
        .map(|c| c.value.clone());

    Some(Dish::new(base.value.clone()).with_fillings(fillings))
}
