//! OTT provider entity - a streaming service a movie can be watched on

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ott {
    pub id: Snowflake,
    pub name: String,
    pub logo_url: Option<String>,
    pub link_url: Option<String>,
}

impl Ott {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            logo_url: None,
            link_url: None,
        }
    }
}
