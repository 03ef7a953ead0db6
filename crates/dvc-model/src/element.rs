//! Logical element tree of a diagram.
//!
//! The host model adapter maps its semantic model into a forest of
//! [`Element`]s once per model snapshot. The tree is read-only for the
//! visibility engine and is replaced wholesale when the host model changes.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a diagram element, unique across the whole tree.
pub type ElementId = String;

/// Type tag of a diagram element.
///
/// Known tags are parsed case-insensitively. Anything outside the UML
/// vocabulary is kept verbatim in [`ElementType::Other`] so that documents
/// written against other vocabularies still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ElementType {
    Class,
    Interface,
    Enumeration,
    PrimitiveType,
    EnumerationLiteral,
    OwnedAttribute,
    OwnedOperation,
    OwnedParameter,
    EObjectReference,
    LiteralInteger,
    LiteralUnlimitedNatural,
    InterfaceRealization,
    Usage,
    SourceModel,
    EObject,
    Other(String),
}

impl ElementType {
    /// Every tag of the UML vocabulary, in display order.
    pub const KNOWN: [ElementType; 15] = [
        ElementType::Class,
        ElementType::Interface,
        ElementType::Enumeration,
        ElementType::PrimitiveType,
        ElementType::EnumerationLiteral,
        ElementType::OwnedAttribute,
        ElementType::OwnedOperation,
        ElementType::OwnedParameter,
        ElementType::EObjectReference,
        ElementType::LiteralInteger,
        ElementType::LiteralUnlimitedNatural,
        ElementType::InterfaceRealization,
        ElementType::Usage,
        ElementType::SourceModel,
        ElementType::EObject,
    ];

    /// Returns the canonical tag as written in diagram models.
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::Class => "Class",
            ElementType::Interface => "Interface",
            ElementType::Enumeration => "Enumeration",
            ElementType::PrimitiveType => "PrimitiveType",
            ElementType::EnumerationLiteral => "EnumerationLiteral",
            ElementType::OwnedAttribute => "OwnedAttribute",
            ElementType::OwnedOperation => "OwnedOperation",
            ElementType::OwnedParameter => "OwnedParameter",
            ElementType::EObjectReference => "EObjectReference",
            ElementType::LiteralInteger => "LiteralInteger",
            ElementType::LiteralUnlimitedNatural => "LiteralUnlimitedNatural",
            ElementType::InterfaceRealization => "UMLInterfaceRealization",
            ElementType::Usage => "UMLUsage",
            ElementType::SourceModel => "UMLSourceModel",
            ElementType::EObject => "EObject",
            ElementType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let known = ElementType::KNOWN
            .iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed));
        Ok(match known {
            Some(known) => known.clone(),
            None => ElementType::Other(s.to_string()),
        })
    }
}

impl From<&str> for ElementType {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        ElementType::from(value.as_str())
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        match value {
            ElementType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl Serialize for ElementType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ElementType::from(tag))
    }
}

/// A node of the diagram's logical tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an unnamed leaf element.
    pub fn new(id: impl Into<ElementId>, element_type: impl Into<ElementType>) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            name: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Visits this element and all of its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Collects the id of every element in the forest, in pre-order.
///
/// The result is duplicate-free even if the host adapter violated id
/// uniqueness; the first occurrence wins.
pub fn all_element_ids(elements: &[Element]) -> Vec<ElementId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for root in elements {
        root.walk(&mut |element| {
            if seen.insert(element.id.as_str()) {
                ids.push(element.id.clone());
            }
        });
    }
    ids
}

/// Total number of elements in the forest.
pub fn count_elements(elements: &[Element]) -> usize {
    let mut count = 0usize;
    for root in elements {
        root.walk(&mut |_| count += 1);
    }
    count
}
