//! Filters decide which elements a layer is responsible for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementType};
use crate::error::ModelError;

/// Matches elements whose type tag is one of `types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilter {
    pub id: String,
    pub name: String,
    pub types: Vec<ElementType>,
}

/// Matches elements whose name satisfies `pattern`.
///
/// A pattern of the form `/body/flags` is a regular expression, anything
/// else is a case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFilter {
    pub id: String,
    pub name: String,
    pub pattern: String,
    /// Carried for editors that narrow the pattern by type. Not used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<ElementType>>,
}

/// An explicit pick of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRef {
    pub id: ElementId,
    /// Display label captured when the element was picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SelectionRef {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// Matches elements listed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFilter {
    pub id: String,
    pub name: String,
    pub elements: Vec<SelectionRef>,
}

impl SelectionFilter {
    pub fn contains(&self, id: &str) -> bool {
        self.elements.iter().any(|selected| selected.id == id)
    }
}

/// A filter owned by exactly one layer.
///
/// The variant is fixed at creation; switching kinds means deleting the
/// filter and creating a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Filter {
    Type(TypeFilter),
    Pattern(PatternFilter),
    Selection(SelectionFilter),
}

impl Filter {
    pub fn id(&self) -> &str {
        match self {
            Filter::Type(filter) => &filter.id,
            Filter::Pattern(filter) => &filter.id,
            Filter::Selection(filter) => &filter.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Filter::Type(filter) => &filter.name,
            Filter::Pattern(filter) => &filter.name,
            Filter::Selection(filter) => &filter.name,
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Type(_) => FilterKind::Type,
            Filter::Pattern(_) => FilterKind::Pattern,
            Filter::Selection(_) => FilterKind::Selection,
        }
    }

    /// Creates a filter of the given kind with an empty payload.
    pub fn empty(kind: FilterKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let name = name.into();
        match kind {
            FilterKind::Type => Filter::Type(TypeFilter {
                id,
                name,
                types: Vec::new(),
            }),
            FilterKind::Pattern => Filter::Pattern(PatternFilter {
                id,
                name,
                pattern: String::new(),
                types: Some(Vec::new()),
            }),
            FilterKind::Selection => Filter::Selection(SelectionFilter {
                id,
                name,
                elements: Vec::new(),
            }),
        }
    }
}

/// The variant of a [`Filter`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Type,
    Pattern,
    Selection,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Type, FilterKind::Pattern, FilterKind::Selection];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Type => "type",
            FilterKind::Pattern => "pattern",
            FilterKind::Selection => "selection",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownFilterKind(s.to_string()))
    }
}
