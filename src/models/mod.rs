pub mod dto;
pub mod filter;
pub mod link;
pub mod pagination;
pub mod predicate;
pub mod sort;
pub mod validation;

pub use dto::{CatalogItem, CatalogPage, CatalogRow, PageSummary};
pub use filter::{Dimension, FilterSelection, RawFilters, ResolvedFilter};
pub use link::{LinkState, PageLink, PageLinkKind, SortTile};
pub use pagination::{parse_page, parse_page_size, PageWindow};
pub use predicate::{MembershipCondition, Predicate};
pub use sort::{SortField, SortOrder, SortSpec};
pub use validation::CatalogError;
