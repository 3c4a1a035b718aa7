//! Locates the rate table in the BCRA page and pulls the most recent row.
//!
//! The page publishes one `<table class="form-table">` whose first row holds
//! `<th>` headers and whose remaining rows hold one day each, oldest first.

use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// Which table and which columns to read.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec<'a> {
    pub class: &'a str,
    pub date_column: &'a str,
    pub currency_column: &'a str,
}

/// Raw cell text of the last data row, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRate {
    pub date: String,
    pub value: String,
}

pub fn extract_last_rate(html: &str, spec: &TableSpec<'_>) -> Result<RawRate> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table").expect("static selector");
    let table = document
        .select(&table_selector)
        .find(|table| table.value().classes().any(|class| class == spec.class))
        .ok_or_else(|| Error::TableNotFound(spec.class.to_string()))?;

    let row_selector = Selector::parse("tr").expect("static selector");
    let rows: Vec<ElementRef<'_>> = table.select(&row_selector).collect();
    let header_row = rows.first().ok_or(Error::NoHeaders)?;
    let headers = cell_texts(header_row, "th");
    if headers.is_empty() {
        return Err(Error::NoHeaders);
    }
    debug!("Table headers: {:?}", headers);

    let position = |label: &str| headers.iter().position(|h| h == label);
    let (date_idx, value_idx) = match (position(spec.date_column), position(spec.currency_column)) {
        (Some(d), Some(v)) => (d, v),
        _ => {
            return Err(Error::MissingColumns {
                date: spec.date_column.to_string(),
                currency: spec.currency_column.to_string(),
            });
        }
    };

    // Row order stands in for date order: the last row is the newest.
    let last_row = rows.last().unwrap_or(header_row);
    let mut cells = cell_texts(last_row, "td");
    let needed = date_idx.max(value_idx) + 1;
    if cells.len() < needed {
        return Err(Error::IncompleteRow {
            found: cells.len(),
            needed,
        });
    }

    let value = std::mem::take(&mut cells[value_idx]);
    let date = std::mem::take(&mut cells[date_idx]);
    Ok(RawRate { date, value })
}

/// Text of each `tag` cell in `row`, with whitespace collapsed.
fn cell_texts(row: &ElementRef<'_>, tag: &str) -> Vec<String> {
    let cell_selector = Selector::parse(tag).expect("static selector");
    row.select(&cell_selector)
        .map(|cell| {
            cell.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: TableSpec<'static> = TableSpec {
        class: "form-table",
        date_column: "Fecha",
        currency_column: "Dólar Estadounidense",
    };

    fn page(table: &str) -> String {
        format!("<html><body><h1>Evolución</h1>{}</body></html>", table)
    }

    #[test]
    fn reads_last_row() {
        let html = page(
            r#"<table class="form-table">
                <tr><th>Fecha</th><th>Euro</th><th>Dólar Estadounidense</th></tr>
                <tr><td>29/02/2024</td><td>910,10</td><td>849,75</td></tr>
                <tr><td> 01/03/2024 </td><td>911,00</td><td>
                    850,25
                </td></tr>
            </table>"#,
        );
        let raw = extract_last_rate(&html, &SPEC).unwrap();
        assert_eq!(
            raw,
            RawRate {
                date: "01/03/2024".into(),
                value: "850,25".into()
            }
        );
    }

    #[test]
    fn column_order_follows_headers() {
        let html = page(
            r#"<table class="other form-table">
                <tr><th>Dólar Estadounidense</th><th>Fecha</th></tr>
                <tr><td>850,25</td><td>01/03/2024</td></tr>
            </table>"#,
        );
        let raw = extract_last_rate(&html, &SPEC).unwrap();
        assert_eq!(raw.date, "01/03/2024");
        assert_eq!(raw.value, "850,25");
    }

    #[test]
    fn missing_table() {
        let html = page("<table class=\"data\"><tr><th>Fecha</th></tr></table>");
        let err = extract_last_rate(&html, &SPEC).unwrap_err();
        assert!(matches!(err, Error::TableNotFound(ref class) if class == "form-table"));
    }

    #[test]
    fn class_is_matched_literally() {
        let html = page(
            r#"<table class="form"><tr><td>
                <table class="inner"><tr><th>Fecha</th><th>Dólar Estadounidense</th></tr>
                <tr><td>01/03/2024</td><td>850,25</td></tr></table>
            </td></tr></table>"#,
        );
        for class in ["form table", "form .inner", "a:b", "table["] {
            let spec = TableSpec { class, ..SPEC };
            assert!(
                matches!(extract_last_rate(&html, &spec), Err(Error::TableNotFound(_))),
                "{class}"
            );
        }
    }

    #[test]
    fn header_row_without_th() {
        let html = page(
            r#"<table class="form-table"><tr><td>Fecha</td><td>Dólar Estadounidense</td></tr></table>"#,
        );
        assert!(matches!(extract_last_rate(&html, &SPEC), Err(Error::NoHeaders)));
    }

    #[test]
    fn missing_currency_column() {
        let html = page(
            r#"<table class="form-table">
                <tr><th>Fecha</th><th>Euro</th></tr>
                <tr><td>01/03/2024</td><td>911,00</td></tr>
            </table>"#,
        );
        assert!(matches!(
            extract_last_rate(&html, &SPEC),
            Err(Error::MissingColumns { .. })
        ));
    }

    #[test]
    fn short_last_row() {
        let html = page(
            r#"<table class="form-table">
                <tr><th>Fecha</th><th>Euro</th><th>Dólar Estadounidense</th></tr>
                <tr><td>01/03/2024</td><td>911,00</td></tr>
            </table>"#,
        );
        assert!(matches!(
            extract_last_rate(&html, &SPEC),
            Err(Error::IncompleteRow { found: 2, needed: 3 })
        ));
    }

    #[test]
    fn header_only_table_is_incomplete() {
        let html = page(
            r#"<table class="form-table"><tr><th>Fecha</th><th>Dólar Estadounidense</th></tr></table>"#,
        );
        assert!(matches!(
            extract_last_rate(&html, &SPEC),
            Err(Error::IncompleteRow { found: 0, needed: 2 })
        ));
    }
}
