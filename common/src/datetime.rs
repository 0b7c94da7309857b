//! Date and time utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
};

/// Format of a calendar [`Date`] in request parameters and payloads.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the [`UNIX_EPOCH`] timestamp of this [`DateTime`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Returns the calendar date of this [`DateTime`] as a `YYYY-MM-DD`
    /// string.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_date_string(&self) -> String {
        self.inner.date().format(&DATE_FORMAT).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as a date: {e}")
        })
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        Ok(Self {
            inner: dt.to_offset(time::UtcOffset::UTC),
            _of: PhantomData,
        })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::OffsetDateTime::from_sql(ty, raw)?
            .try_into()
            .map_err(Box::from)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

/// Calendar date without a time component.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl FromStr for Date {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, &DATE_FORMAT)
            .map(Self)
            .map_err(ParseDateError)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(&DATE_FORMAT).unwrap_or_else(|e| {
            panic!("cannot format `Date`: {e}")
        });
        f.write_str(&formatted)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Date {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Date {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

/// Error of parsing a [`Date`] from a `YYYY-MM-DD` string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid date: {_0}")]
pub struct ParseDateError(time::error::Parse);

/// Requested range of days, bounded on none, one or both sides.
///
/// Both bounds are inclusive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DateRange {
    /// First day of the range, if bounded.
    begin: Option<Date>,

    /// Last day of the range, if bounded.
    end: Option<Date>,
}

impl DateRange {
    /// Creates a new [`DateRange`] from the provided bounds.
    ///
    /// # Errors
    ///
    /// If the `end` bound precedes the `begin` one.
    pub fn new(
        begin: Option<Date>,
        end: Option<Date>,
    ) -> Result<Self, InvertedDateRange> {
        if let (Some(b), Some(e)) = (begin, end) {
            if b > e {
                return Err(InvertedDateRange);
            }
        }
        Ok(Self { begin, end })
    }

    /// Returns the first day of this [`DateRange`], if bounded.
    #[must_use]
    pub fn begin(&self) -> Option<Date> {
        self.begin
    }

    /// Returns the last day of this [`DateRange`], if bounded.
    #[must_use]
    pub fn end(&self) -> Option<Date> {
        self.end
    }

    /// Indicates whether this [`DateRange`] is unbounded on both sides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin.is_none() && self.end.is_none()
    }

    /// Indicates whether an interval spanning `begin..=end` days overlaps
    /// this [`DateRange`].
    ///
    /// Two intervals overlap iff the interval begins no later than this range
    /// ends, and ends no earlier than this range begins. A one-sided range
    /// only applies its present bound. An unbounded range overlaps nothing.
    #[must_use]
    pub fn overlaps(&self, begin: Date, end: Date) -> bool {
        match (self.begin, self.end) {
            (Some(b), Some(e)) => begin <= e && end >= b,
            (Some(b), None) => end >= b,
            (None, Some(e)) => begin <= e,
            (None, None) => false,
        }
    }
}

/// Error of creating a [`DateRange`] with an end date preceding its begin
/// date.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("end date precedes begin date")]
pub struct InvertedDateRange;
