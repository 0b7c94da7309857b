//! [`Area`]-related read definitions.

use serde::Serialize;

use crate::domain::{area, Area};

/// [`Area`] as exposed to clients.
#[derive(Clone, Debug, Serialize)]
pub struct Info {
    /// ID of the [`Area`].
    #[serde(rename = "aid")]
    pub id: area::Id,

    /// Name of the [`Area`].
    #[serde(rename = "aname")]
    pub name: area::Name,
}

impl From<Area> for Info {
    fn from(area: Area) -> Self {
        Self { id: area.id, name: area.name }
    }
}
