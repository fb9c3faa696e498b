//! QuoteDesk Service
//!
//! Derived views of a quote snapshot (track partition, selection, pricing,
//! notes, sales area, referenced networks, share text), the view state of an
//! open quote and the validated backend actions that update it.

pub mod actions;
pub mod notes;
pub mod pricing;
pub mod quote_list;
pub mod refnet;
pub mod rich_text;
pub mod sales_area;
pub mod selection;
pub mod session;
pub mod share;
pub mod text_search;
pub mod type_partition;

pub use actions::{
	InFlightGuard, QuoteAction, QuoteActionError, QuoteActionResult, QuoteActionService,
};
pub use notes::{extract_links, notes_for_tab, tabs_with_content, NoteEntry};
pub use pricing::{price_breakdown, PriceBreakdown, PriceRow};
pub use quote_list::filter_quotes;
pub use refnet::{refnet_cities, refnet_entries, RefnetEntry, RefnetFilter};
pub use rich_text::{normalize as normalize_rich_text, strip_tags, RichText};
pub use sales_area::SalesAreaMatrix;
pub use selection::{
	selected_products, tracks_with_products, FeaturedCursor, SelectedProduct, SelectionSet,
};
pub use session::QuoteSession;
pub use share::{build_share_message, share_link};
pub use text_search::{fold, SearchQuery};
pub use type_partition::{available_types, resolve_active_type};
