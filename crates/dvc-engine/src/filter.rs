//! Filter evaluation against an element forest.
//!
//! A matching element always reveals its whole subtree. Type and pattern
//! filters test the elements of the given list only; selection filters also
//! descend into elements that were not picked themselves.

use std::collections::HashSet;

use indexmap::IndexSet;

use dvc_model::{Element, ElementId, Filter, PatternFilter, SelectionFilter, TypeFilter};

use crate::pattern::PatternMatcher;

/// Duplicate-free element ids in discovery order.
pub type IdSet = IndexSet<ElementId>;

/// Ids matched by a filter, including descendants of matched elements.
pub fn match_ids(elements: &[Element], filter: &Filter) -> IdSet {
    match filter {
        Filter::Type(filter) => match_type_filter(elements, filter),
        Filter::Pattern(filter) => match_pattern_filter(elements, filter),
        Filter::Selection(filter) => match_selection_filter(elements, filter),
    }
}

pub fn match_type_filter(elements: &[Element], filter: &TypeFilter) -> IdSet {
    let mut ids = IdSet::new();
    if filter.types.is_empty() {
        return ids;
    }
    for element in elements {
        if filter.types.contains(&element.element_type) {
            reveal_subtree(element, &mut ids);
        }
    }
    ids
}

pub fn match_pattern_filter(elements: &[Element], filter: &PatternFilter) -> IdSet {
    let matcher = PatternMatcher::compile(&filter.pattern);
    match_with_matcher(elements, &matcher)
}

/// Pattern evaluation with an already compiled matcher.
pub fn match_with_matcher(elements: &[Element], matcher: &PatternMatcher) -> IdSet {
    let mut ids = IdSet::new();
    for element in elements {
        let Some(name) = element.name.as_deref() else {
            continue;
        };
        if matcher.is_match(name) {
            reveal_subtree(element, &mut ids);
        }
    }
    ids
}

pub fn match_selection_filter(elements: &[Element], filter: &SelectionFilter) -> IdSet {
    let selected: HashSet<&str> = filter
        .elements
        .iter()
        .map(|selected| selected.id.as_str())
        .collect();
    let mut ids = IdSet::new();
    if !selected.is_empty() {
        collect_selected(elements, &selected, &mut ids);
    }
    ids
}

fn collect_selected(elements: &[Element], selected: &HashSet<&str>, ids: &mut IdSet) {
    for element in elements {
        if selected.contains(element.id.as_str()) {
            reveal_subtree(element, ids);
        } else {
            collect_selected(&element.children, selected, ids);
        }
    }
}

fn reveal_subtree(element: &Element, ids: &mut IdSet) {
    element.walk(&mut |node| {
        ids.insert(node.id.clone());
    });
}
