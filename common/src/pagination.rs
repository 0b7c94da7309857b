//! Abstractions for page-number pagination.

use std::{num::NonZeroU32, str::FromStr};

use derive_more::{Display, Error, From, Into};

/// 1-based number of a page in a listing.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// First page of any listing.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`PageNumber`] from the provided number.
    ///
    /// [`None`] is returned if the number is zero.
    #[must_use]
    pub fn new(num: u32) -> Option<Self> {
        NonZeroU32::new(num).map(Self)
    }

    /// Returns this [`PageNumber`] as a number.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the number of items preceding this page in a listing with the
    /// provided [`Capacity`].
    #[must_use]
    pub fn offset(self, capacity: Capacity) -> u64 {
        u64::from(self.get() - 1) * u64::from(capacity.get())
    }

    /// Indicates whether this page lies beyond the provided [`TotalPages`].
    ///
    /// An overflowing page is not an error: it's served as an empty page and
    /// is never cached.
    #[must_use]
    pub fn overflows(self, total: TotalPages) -> bool {
        self.get() > total.get()
    }
}

impl FromStr for PageNumber {
    type Err = InvalidPageNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or(InvalidPageNumber)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PageNumber {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.get())
    }
}

/// Error of parsing a [`PageNumber`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("page number must be a positive integer")]
pub struct InvalidPageNumber;

/// Fixed number of items a single page holds.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Capacity(NonZeroU32);

impl Capacity {
    /// Minimal possible [`Capacity`] of a page.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Capacity`] from the provided number.
    ///
    /// [`None`] is returned if the number is zero.
    #[must_use]
    pub fn new(num: u32) -> Option<Self> {
        NonZeroU32::new(num).map(Self)
    }

    /// Returns this [`Capacity`] as a number.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Total number of pages in a listing.
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
pub struct TotalPages(u32);

impl TotalPages {
    /// Counts [`TotalPages`] of a listing with `total_items` items split into
    /// pages of the provided [`Capacity`].
    ///
    /// An empty listing has 0 pages.
    #[must_use]
    pub fn of(total_items: u64, capacity: Capacity) -> Self {
        let capacity = u64::from(capacity.get());
        Self(
            u32::try_from(total_items.div_ceil(capacity))
                .unwrap_or(u32::MAX),
        )
    }

    /// Returns this [`TotalPages`] as a number.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TotalPages {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.get())
    }
}
