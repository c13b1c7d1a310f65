use serde::{Deserialize, Serialize};

pub const DEFAULT_HEADERS: [&str; 6] = [
    "Parent Company",
    "Subsidiary Portfolio / Services",
    "HQ / Info",
    "Annual Revenue ($ million)",
    "HomePage",
    "Logo",
];

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Document {
    #[serde(rename = "Mainline")]
    pub mainline: Option<Mainline>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Mainline {
    #[serde(rename = "Table")]
    pub table: Option<Table>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Table {
    #[serde(rename = "Header")]
    pub header: Option<TableHeader>,
    #[serde(rename = "Row")]
    pub row: Option<Vec<CompanyRow>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TableHeader {
    #[serde(rename = "Data")]
    pub data: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CompanyRow {
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Services")]
    pub services: Option<String>,
    #[serde(rename = "Hubs")]
    pub hubs: Option<Hubs>,
    #[serde(rename = "Revenue")]
    pub revenue: Option<String>,
    #[serde(rename = "HomePage")]
    pub home_page: Option<String>,
    #[serde(rename = "Logo")]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Hubs {
    #[serde(rename = "Hub")]
    pub hub: Option<OneOrMany>,
}

// Feeds converted from XML carry a single hub as a bare string instead
// of a one-element list.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Document {
    // Only JSON syntax errors are parse failures; a well-formed body
    // of the wrong shape is the "no data" case, not an error.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    fn table(&self) -> Option<&Table> {
        self.mainline.as_ref().and_then(|m| m.table.as_ref())
    }

    pub fn rows(&self) -> &[CompanyRow] {
        self.table()
            .and_then(|t| t.row.as_deref())
            .unwrap_or_default()
    }

    pub fn headers(&self) -> Vec<String> {
        let supplied = self
            .table()
            .and_then(|t| t.header.as_ref())
            .and_then(|h| h.data.as_ref());
        match supplied {
            Some(data) if !data.is_empty() => data.clone(),
            _ => DEFAULT_HEADERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CompanyRow {
    pub fn hub_names(&self) -> Vec<String> {
        match self.hubs.as_ref().and_then(|h| h.hub.as_ref()) {
            Some(OneOrMany::One(hub)) => vec![hub.clone()],
            Some(OneOrMany::Many(hubs)) => hubs.clone(),
            None => Vec::new(),
        }
    }
}
