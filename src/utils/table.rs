use crate::models::ChartSpec;

use super::html::escape;
use super::Locale;

/// A simple HTML table for the figures behind a chart
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// One row per category: the label followed by each series' value in full euros
    pub fn from_chart(spec: &ChartSpec, locale: Locale) -> Self {
        let mut headers = vec![spec.x_axis_title.as_str()];
        headers.extend(spec.series.iter().map(|s| s.name.as_str()));
        let mut table = Table::new(headers);

        for (i, label) in spec.x_labels.iter().enumerate() {
            let cells: Vec<String> = spec
                .series
                .iter()
                .map(|series| {
                    series
                        .values
                        .get(i)
                        .map(|v| format!("{} €", locale.format_full(*v)))
                        .unwrap_or_default()
                })
                .collect();
            let mut row = vec![label.as_str()];
            row.extend(cells.iter().map(String::as_str));
            table.add_row(row);
        }
        table
    }

    /// Add a row to the table; missing cells are left blank, extra cells dropped
    pub fn add_row(&mut self, row: Vec<&str>) {
        let mut row: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as HTML
    pub fn render(&self) -> String {
        let mut output = String::from("<table class=\"data-table\">\n<thead><tr>");
        for header in &self.headers {
            output.push_str(&format!("<th>{}</th>", escape(header)));
        }
        output.push_str("</tr></thead>\n<tbody>\n");

        for row in &self.rows {
            output.push_str("<tr>");
            for (i, cell) in row.iter().enumerate() {
                // first column is the category, the rest are amounts
                if i == 0 {
                    output.push_str(&format!("<td>{}</td>", escape(cell)));
                } else {
                    output.push_str(&format!("<td class=\"num\">{}</td>", escape(cell)));
                }
            }
            output.push_str("</tr>\n");
        }

        output.push_str("</tbody>\n</table>\n");
        output
    }
}
