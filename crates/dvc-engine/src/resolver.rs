//! Layer resolution: a layer claims the elements all of its filters agree on.

use dvc_model::{Element, ElementId, FilterCombination, Layer};

use crate::filter::{IdSet, match_ids};

/// Ids claimed by one layer, in the order the first filter discovered them.
///
/// A layer without filters claims nothing. With
/// [`FilterCombination::FirstTwo`] filters after the second are ignored.
pub fn claimed_ids(
    elements: &[Element],
    layer: &Layer,
    combination: FilterCombination,
) -> Vec<ElementId> {
    claimed_set(elements, layer, combination)
        .into_iter()
        .collect()
}

pub(crate) fn claimed_set(
    elements: &[Element],
    layer: &Layer,
    combination: FilterCombination,
) -> IdSet {
    let mut filters = layer.filters.iter();
    let Some(first) = filters.next() else {
        return IdSet::new();
    };
    let mut claimed = match_ids(elements, first);
    let remaining = match combination {
        FilterCombination::All => layer.filters.len() - 1,
        FilterCombination::FirstTwo => 1,
    };
    for filter in filters.take(remaining) {
        if claimed.is_empty() {
            break;
        }
        let matched = match_ids(elements, filter);
        claimed.retain(|id| matched.contains(id));
    }
    claimed
}
