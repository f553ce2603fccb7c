use std::cmp::Ordering;

use crate::models::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Status,
    Species,
    Gender,
    Origin,
    Created,
}

impl SortField {
    /// Case-sensitive lexical comparison for strings, chronological for the
    /// creation timestamp.
    fn compare(self, a: &Character, b: &Character) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Status => a.status.cmp(&b.status),
            SortField::Species => a.species.cmp(&b.species),
            SortField::Gender => a.gender.cmp(&b.gender),
            SortField::Origin => a.origin.name.cmp(&b.origin.name),
            SortField::Created => a.created.cmp(&b.created),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// `field: None` means fetch order (no reordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortDirective {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

/// Derives the ordered view from the flattened collection. Never mutates its
/// input and always re-sorts from scratch, so repeated calls with the same
/// inputs yield the same output. The sort is stable: equal keys keep their
/// relative fetch order in both directions.
pub fn project(flattened: &[Character], directive: &SortDirective) -> Vec<Character> {
    let mut view = flattened.to_vec();
    if let Some(field) = directive.field {
        view.sort_by(|a, b| {
            let ordering = field.compare(a, b);
            match directive.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    view
}
