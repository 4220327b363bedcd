// Library root: level classification, stat ordering, rating normalization and
// the presentation view-models built on top of them. No I/O.

pub mod bucketing;
pub mod columns;
pub mod compare;
pub mod comps;
pub mod defaults;
pub mod directory;
pub mod format;
pub mod guard;
pub mod level;
pub mod prediction;
pub mod ratings;
pub mod reconcile;
pub mod season;
pub mod trend;

pub use bucketing::{available_levels, filter_and_order, filtered_copy, latest_season};
pub use level::{CompetitionTier, LevelFilter, ParseLevelError};
pub use ratings::{normalize, PlayerType, RatingRecord};
pub use reconcile::{reconcile, reconcile_response, PlayerRatings, TwoWayRatings};
pub use season::{SeasonRecord, SeasonValue};
pub use trend::{history_from_response, merge_trends, TrendChart};
