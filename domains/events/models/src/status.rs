use std::{fmt, str::FromStr};

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
)]
pub enum EventStatus {
    #[default]
    Draft,
    Active,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event status: {0}")]
pub struct UnknownStatus(pub String);

impl EventStatus {
    pub const ALL: [EventStatus; 4] =
        [Self::Draft, Self::Active, Self::Cancelled, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    /// Stable numeric id, in declaration order.
    pub fn id(&self) -> i32 {
        match self {
            Self::Draft => 0,
            Self::Active => 1,
            Self::Cancelled => 2,
            Self::Completed => 3,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl ToSql for EventStatus {
    tokio_postgres::types::to_sql_checked!();

    fn to_sql(
        &self, ty: &Type, out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        self.as_str().to_sql(ty, out)
    }

    fn accepts(ty: &Type) -> bool { <&str as ToSql>::accepts(ty) }
}

impl<'a> FromSql<'a> for EventStatus {
    fn from_sql(
        ty: &Type, raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let text = <&str as FromSql>::from_sql(ty, raw)?;
        Ok(text.parse()?)
    }

    fn accepts(ty: &Type) -> bool { <&str as FromSql>::accepts(ty) }
}
