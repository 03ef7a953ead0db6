pub mod buckets;
pub mod element;
pub mod error;
pub mod filter;
pub mod layer;
pub mod options;

pub use buckets::ElementIdsPerLayer;
pub use element::{Element, ElementId, ElementType, all_element_ids, count_elements};
pub use error::{ModelError, Result};
pub use filter::{Filter, FilterKind, PatternFilter, SelectionFilter, SelectionRef, TypeFilter};
pub use layer::{DEFAULT_BUCKET, Layer, LayerId, LayerMode};
pub use options::{EngineOptions, FilterCombination, PolicyKind, ZOrder};
