use super::{escape_html, RowRecord};

pub fn render_table(headers: &[String], records: &[RowRecord]) -> String {
    let mut thead = String::new();
    thead.push_str("<thead><tr>");
    for h in headers {
        thead.push_str(&format!("<th>{}</th>", escape_html(h)));
    }
    thead.push_str("</tr></thead>");

    let mut tbody = String::new();
    tbody.push_str("<tbody>");
    for r in records {
        let name = escape_html(&r.company);
        let services = escape_html(&r.services);
        let hubs = r
            .hubs
            .iter()
            .map(|h| escape_html(h))
            .collect::<Vec<_>>()
            .join("<br>");
        let revenue = escape_html(&r.revenue);

        let homepage_cell = match r.homepage.as_deref() {
            Some(href) => format!(
                r#"<a href="{}" target="_blank" rel="noopener">HomePage</a>"#,
                escape_html(href)
            ),
            None => String::new(),
        };

        let logo_cell = match r.logo.as_deref() {
            Some(src) => {
                let alt = if name.is_empty() {
                    "Logo".to_string()
                } else {
                    format!("{name} Logo")
                };
                format!(
                    r#"<img src="{}" alt="{}" width="50" height="50" />"#,
                    escape_html(src),
                    alt
                )
            }
            None => String::new(),
        };

        tbody.push_str(&format!(
            "<tr>\
             <td>{name}</td>\
             <td>{services}</td>\
             <td>{hubs}</td>\
             <td>{revenue}</td>\
             <td>{homepage_cell}</td>\
             <td>{logo_cell}</td>\
             </tr>"
        ));
    }
    tbody.push_str("</tbody>");

    format!(r#"<table border="1">{thead}{tbody}</table>"#)
}

pub fn render_document(headers: &[String], records: &[RowRecord], base_href: Option<&str>) -> String {
    let table = render_table(headers, records);
    let base_tag = match base_href {
        Some(href) => format!("\n  <base href=\"{}\">", escape_html(href)),
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <title>Trucking Companies</title>
  <meta name="viewport" content="width=device-width, initial-scale=1" />{base_tag}
  <style>
    body {{ font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; padding: 24px; }}
    h1 {{ font-size: 1.25rem; margin: 0 0 12px; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border: 1px solid #ddd; padding: 10px; text-align: left; vertical-align: top; }}
    th {{ background: #f3f4f6; }}
    img {{ object-fit: contain; }}
    a {{ word-break: break-all; }}
  </style>
</head>
<body>
  <h1>Trucking Companies</h1>
  {table}
</body>
</html>"#
    )
}

pub fn render_message_document(message: &str) -> String {
    format!(
        r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Trucking Companies</title></head>
<body style="font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; padding: 24px;">
  <p><strong>{}</strong></p>
</body></html>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crate::output::build_records;
    use url::Url;

    #[test]
    fn table_escapes_text_and_resolves_links() {
        let doc = Document::parse(
            r#"{"Mainline":{"Table":{"Row":[{"Company":"<A&B>","HomePage":"page.html"}]}}}"#,
        )
        .unwrap();
        let base = Url::parse("https://x.test/data.json").unwrap();
        let records = build_records(doc.rows(), Some(&base));
        let html = render_table(&doc.headers(), &records);
        assert!(html.contains("<td>&lt;A&amp;B&gt;</td>"));
        assert!(html.contains(r#"<a href="https://x.test/page.html" target="_blank" rel="noopener">HomePage</a>"#));
    }

    #[test]
    fn empty_fields_render_empty_cells() {
        let doc = Document::parse(r#"{"Mainline":{"Table":{"Row":[{}]}}}"#).unwrap();
        let records = build_records(doc.rows(), None);
        let html = render_table(&doc.headers(), &records);
        assert!(!html.contains("<a "));
        assert!(!html.contains("<img "));
        assert_eq!(html.matches("<td></td>").count(), 6);
    }

    #[test]
    fn hubs_join_with_line_breaks() {
        let doc = Document::parse(
            r#"{"Mainline":{"Table":{"Row":[{"Hubs":{"Hub":["A<1>","B"]}}]}}}"#,
        )
        .unwrap();
        let records = build_records(doc.rows(), None);
        let html = render_table(&doc.headers(), &records);
        assert!(html.contains("<td>A&lt;1&gt;<br>B</td>"));
    }

    #[test]
    fn logo_alt_falls_back_when_company_missing() {
        let doc = Document::parse(
            r#"{"Mainline":{"Table":{"Row":[{"Logo":"l.png"},{"Company":"Acme","Logo":"l.png"}]}}}"#,
        )
        .unwrap();
        let records = build_records(doc.rows(), None);
        let html = render_table(&doc.headers(), &records);
        assert!(html.contains(r#"alt="Logo""#));
        assert!(html.contains(r#"alt="Acme Logo""#));
    }

    #[test]
    fn rows_render_in_input_order() {
        let doc = Document::parse(
            r#"{"Mainline":{"Table":{"Row":[{"Company":"Zulu"},{"Company":"Alpha"}]}}}"#,
        )
        .unwrap();
        let records = build_records(doc.rows(), None);
        let html = render_table(&doc.headers(), &records);
        let zulu = html.find("Zulu").unwrap();
        let alpha = html.find("Alpha").unwrap();
        assert!(zulu < alpha);
    }

    #[test]
    fn document_carries_base_href() {
        let html = render_document(&[], &[], Some("https://x.test/data.json"));
        assert!(html.contains(r#"<base href="https://x.test/data.json">"#));
        let html = render_document(&[], &[], None);
        assert!(!html.contains("<base"));
    }

    #[test]
    fn message_document_escapes_message() {
        let html = render_message_document("No <rows> & none");
        assert!(html.contains("<strong>No &lt;rows&gt; &amp; none</strong>"));
    }
}
