pub mod table;

use serde::Serialize;
use url::Url;

use crate::model::CompanyRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Best-effort: a link that does not resolve against the base stays as
// written in the feed.
pub fn resolve_href(base: Option<&Url>, raw: &str) -> String {
    match base {
        Some(base) => match base.join(raw) {
            Ok(abs) => abs.to_string(),
            Err(_) => raw.to_string(),
        },
        None => raw.to_string(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RowRecord {
    pub company: String,
    pub services: String,
    pub hubs: Vec<String>,
    pub revenue: String,
    pub homepage: Option<String>,
    pub logo: Option<String>,
}

pub fn build_records(rows: &[CompanyRow], base: Option<&Url>) -> Vec<RowRecord> {
    rows.iter()
        .map(|row| {
            let homepage = row
                .home_page
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| resolve_href(base, s));
            let logo = row
                .logo
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| resolve_href(base, s));
            RowRecord {
                company: row.company.clone().unwrap_or_default(),
                services: row.services.clone().unwrap_or_default(),
                hubs: row.hub_names(),
                revenue: row.revenue.clone().unwrap_or_default(),
                homepage,
                logo,
            }
        })
        .collect()
}

pub fn render_text(records: &[RowRecord]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(&r.company);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(records: &[RowRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_html(headers: &[String], records: &[RowRecord], base_href: Option<&str>) -> Vec<u8> {
    table::render_document(headers, records, base_href).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    #[test]
    fn escape_html_covers_the_special_set() {
        assert_eq!(
            escape_html(r#"<A&B> "q" 'v'"#),
            "&lt;A&amp;B&gt; &quot;q&quot; &#39;v&#39;"
        );
    }

    #[test]
    fn resolve_href_joins_against_document_url() {
        let base = Url::parse("https://x.test/data.json").unwrap();
        assert_eq!(
            resolve_href(Some(&base), "page.html"),
            "https://x.test/page.html"
        );
        assert_eq!(
            resolve_href(Some(&base), "https://other.test/logo.png"),
            "https://other.test/logo.png"
        );
    }

    #[test]
    fn resolve_href_degrades_to_raw_value() {
        let base = Url::parse("https://x.test/data.json").unwrap();
        assert_eq!(resolve_href(Some(&base), "http://["), "http://[");
        assert_eq!(resolve_href(None, "page.html"), "page.html");
    }

    #[test]
    fn records_drop_empty_links_and_keep_order() {
        let doc = Document::parse(
            r#"{"Mainline":{"Table":{"Row":[
                {"Company":"B Freight","HomePage":""},
                {"Company":"A Freight","HomePage":"a.html","Logo":"a.png"}
            ]}}}"#,
        )
        .unwrap();
        let base = Url::parse("https://x.test/list.json").unwrap();
        let records = build_records(doc.rows(), Some(&base));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company, "B Freight");
        assert!(records[0].homepage.is_none());
        assert!(records[0].logo.is_none());
        assert_eq!(records[1].homepage.as_deref(), Some("https://x.test/a.html"));
        assert_eq!(records[1].logo.as_deref(), Some("https://x.test/a.png"));
    }

    #[test]
    fn format_parse_and_inference() {
        assert_eq!(OutputFormat::parse("HTML"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("csv"), None);
        assert_eq!(infer_format_from_path("out.htm"), Some(OutputFormat::Html));
        assert_eq!(
            infer_format_from_path("records.json"),
            Some(OutputFormat::Json)
        );
        assert_eq!(infer_format_from_path("out"), None);
    }
}
