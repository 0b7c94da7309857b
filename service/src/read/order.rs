//! Order-related read definitions.

use derive_more::From;

use crate::domain::house;

/// IDs of houses having at least one order overlapping some date range.
///
/// Considers orders in any [`Status`], so a canceled booking still blocks
/// the dates it spans.
///
/// [`Status`]: crate::domain::order::Status
#[derive(Clone, Debug, Default, From)]
pub struct Conflicts(Vec<house::Id>);

impl Conflicts {
    /// Returns the conflicting [`house::Id`]s.
    #[must_use]
    pub fn as_slice(&self) -> &[house::Id] {
        &self.0
    }

    /// Indicates whether there are no conflicts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
