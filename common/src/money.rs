//! Money amounts.

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use derive_more::{Display, From, Into};

/// Money amount in minor units of the currency (cents).
///
/// Prices and deposits are persisted and exposed as plain integers of minor
/// units, so no fractional arithmetic is ever involved.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, Ord,
    PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize)
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Money(i64);

#[cfg(test)]
mod spec {
    use super::Money;

    #[test]
    fn orders_by_amount() {
        assert!(Money::from(199) < Money::from(200));
        assert_eq!(i64::from(Money::from(34500)), 34500);
    }
}
