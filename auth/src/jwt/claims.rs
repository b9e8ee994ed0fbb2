use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::role::Role;

/// RFC 7519 NumericDate kept to the millisecond.
///
/// Serialized as seconds since the epoch; fractional when the instant does
/// not fall on a whole second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericDate(i64);

impl NumericDate {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn timestamp_millis(self) -> i64 {
        self.0
    }

    /// `None` when the value is outside the range chrono can represent.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for NumericDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }
}

impl Serialize for NumericDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.rem_euclid(1000) == 0 {
            serializer.serialize_i64(self.0.div_euclid(1000))
        } else {
            serializer.serialize_f64(self.0 as f64 / 1000.0)
        }
    }
}

impl<'de> Deserialize<'de> for NumericDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumericDateVisitor;

        impl<'de> de::Visitor<'de> for NumericDateVisitor {
            type Value = NumericDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("seconds since the Unix epoch")
            }

            fn visit_i64<E: de::Error>(self, seconds: i64) -> Result<Self::Value, E> {
                seconds
                    .checked_mul(1000)
                    .map(NumericDate)
                    .ok_or_else(|| E::custom("NumericDate out of range"))
            }

            fn visit_u64<E: de::Error>(self, seconds: u64) -> Result<Self::Value, E> {
                i64::try_from(seconds)
                    .map_err(|_| E::custom("NumericDate out of range"))
                    .and_then(|seconds| self.visit_i64(seconds))
            }

            fn visit_f64<E: de::Error>(self, seconds: f64) -> Result<Self::Value, E> {
                let millis = (seconds * 1000.0).round();
                if millis.is_finite() && millis.abs() < i64::MAX as f64 {
                    Ok(NumericDate(millis as i64))
                } else {
                    Err(E::custom("NumericDate out of range"))
                }
            }
        }

        deserializer.deserialize_any(NumericDateVisitor)
    }
}

/// Session token claims.
///
/// Standard RFC 7519 `sub`, `iat` and `exp` plus the account role.
/// All fields are required; a payload missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account username)
    pub sub: String,

    /// Account role
    pub role: Role,

    /// Issued at
    pub iat: NumericDate,

    /// Expiration time
    pub exp: NumericDate,
}

impl Claims {
    /// Create claims for an account, valid from `issued_at` for `ttl`.
    ///
    /// Both instants are kept to the millisecond.
    pub fn for_account(
        subject: impl ToString,
        role: Role,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = NumericDate::from(issued_at);

        Self {
            sub: subject.to_string(),
            role,
            iat,
            exp: NumericDate::from_millis(iat.timestamp_millis() + ttl.num_milliseconds()),
        }
    }

    /// Check if the token is expired at `now`.
    ///
    /// Expiry is exclusive: a token is no longer valid at the `exp` instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        NumericDate::from(now) >= self.exp
    }
}
