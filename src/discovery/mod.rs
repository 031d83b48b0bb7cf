//! Show discovery pipeline
//!
//! Pure derivations over already-fetched data:
//! - `filter`: text + genre filtering of the show list
//! - `paginate`: page slicing and page counts
//! - `season`: season selection and episode totals for a show detail
//!
//! Nothing here mutates its input or touches the network.

pub mod filter;
pub mod paginate;
pub mod season;

pub use filter::{filter, matches};
pub use paginate::{paginate, total_pages, Page};
pub use season::{default_season, next_season, prev_season, select_season, total_episodes};
