//! Render-side visibility.
//!
//! The diagram renderer needs containers of visible elements even when the
//! containers themselves were not selected, otherwise their visible children
//! have nothing to be drawn in. [`VisibleElements`] expands a visible id list
//! with every ancestor and answers lookups by id.

use std::collections::{HashMap, HashSet};

use dvc_model::{Element, ElementId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleElements {
    /// `None` until a visible set has been reported: everything is visible.
    ids: Option<HashSet<ElementId>>,
}

impl VisibleElements {
    /// No visibility information yet; every element is visible.
    pub fn all() -> Self {
        Self { ids: None }
    }

    /// Builds the render set from reported visible ids.
    ///
    /// Ids that do not exist in `elements` are skipped.
    pub fn from_visible_ids(elements: &[Element], visible: &[ElementId]) -> Self {
        let parents = parent_index(elements);
        let mut ids = HashSet::new();
        for id in visible {
            let Some(mut parent) = parents.get(id.as_str()).copied() else {
                continue;
            };
            ids.insert(id.clone());
            while let Some(parent_id) = parent {
                if !ids.insert(parent_id.to_string()) {
                    break;
                }
                parent = parents.get(parent_id).copied().flatten();
            }
        }
        Self { ids: Some(ids) }
    }

    pub fn is_visible(&self, element_id: &str) -> bool {
        match &self.ids {
            Some(ids) => ids.contains(element_id),
            None => true,
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.ids.is_some()
    }

    /// Visible ids of the forest, in tree order.
    pub fn ordered_ids(&self, elements: &[Element]) -> Vec<ElementId> {
        dvc_model::all_element_ids(elements)
            .into_iter()
            .filter(|id| self.is_visible(id))
            .collect()
    }
}

/// Maps every element id to its parent id (`None` for roots).
fn parent_index(elements: &[Element]) -> HashMap<&str, Option<&str>> {
    let mut parents = HashMap::new();
    for root in elements {
        index_subtree(root, None, &mut parents);
    }
    parents
}

fn index_subtree<'a>(
    element: &'a Element,
    parent: Option<&'a str>,
    parents: &mut HashMap<&'a str, Option<&'a str>>,
) {
    parents.entry(element.id.as_str()).or_insert(parent);
    for child in &element.children {
        index_subtree(child, Some(element.id.as_str()), parents);
    }
}

#[cfg(test)]
mod tests {
    use dvc_model::ElementType;

    use super::*;

    fn forest() -> Vec<Element> {
        vec![
            Element::new("pkg", ElementType::SourceModel).with_children(vec![
                Element::new("c1", ElementType::Class).with_children(vec![
                    Element::new("a1", ElementType::OwnedAttribute),
                    Element::new("a2", ElementType::OwnedAttribute),
                ]),
                Element::new("c2", ElementType::Class),
            ]),
            Element::new("i1", ElementType::Interface),
        ]
    }

    #[test]
    fn ancestors_of_visible_elements_are_visible() {
        let visible = VisibleElements::from_visible_ids(&forest(), &["a1".to_string()]);
        assert!(visible.is_visible("a1"));
        assert!(visible.is_visible("c1"));
        assert!(visible.is_visible("pkg"));
        assert!(!visible.is_visible("a2"));
        assert!(!visible.is_visible("c2"));
        assert!(!visible.is_visible("i1"));
        assert_eq!(visible.ordered_ids(&forest()), vec!["pkg", "c1", "a1"]);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let visible =
            VisibleElements::from_visible_ids(&forest(), &["missing".to_string(), "i1".to_string()]);
        assert!(!visible.is_visible("missing"));
        assert!(visible.is_visible("i1"));
        assert!(visible.is_restricted());
    }

    #[test]
    fn unreported_visibility_shows_everything() {
        let visible = VisibleElements::all();
        assert!(visible.is_visible("anything"));
        assert!(!visible.is_restricted());
    }
}
