use crate::models::NavNode;
use crate::services::nav_service::render_sidebar;
use crate::utils::html::escape;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 0; color: #212529; }
.container { display: flex; min-height: 100vh; }
.sidebar { flex: 0 0 25%; padding: 1rem; background: #f8f9fa; border-right: 1px solid #dee2e6; }
.sidebar h2 { font-weight: 300; font-size: 2rem; }
.nav-group { margin-left: 0.5rem; }
.nav-group summary { cursor: pointer; padding: 0.4rem 0; font-weight: 600; }
.nav-link { display: block; padding: 5px; color: black; text-decoration: none; }
.nav-link.active { background: #e7f1ff; font-weight: 600; }
.nav-link.placeholder { color: #6c757d; }
.content { flex: 1; padding: 1rem 2rem; }
.year-select { margin: 1rem 0; width: 50%; }
.data-table { border-collapse: collapse; margin-bottom: 2rem; }
.data-table th, .data-table td { border-bottom: 1px solid #dee2e6; padding: 0.25rem 0.75rem; }
.data-table td.num { text-align: right; }
footer { color: #6c757d; font-size: 0.8rem; margin-top: 2rem; }
";

/// Full page: sidebar on the left, `content` on the right
pub fn render_layout(title: &str, navigation: &[NavNode], active_path: &str, content: &str, footer: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{style}</style>\n</head>\n<body>\n<div class=\"container\">\n{sidebar}<main class=\"content\">\n{content}<footer>{footer}</footer>\n</main>\n</div>\n</body>\n</html>\n",
        title = escape(title),
        style = STYLE,
        sidebar = render_sidebar(navigation, active_path),
        content = content,
        footer = escape(footer),
    )
}

/// Dropdown of the years with data; submitting reloads the page with `?jahr=`
pub fn render_year_select(path: &str, years: &[i32], selected: i32) -> String {
    let mut years = years.to_vec();
    if !years.contains(&selected) {
        years.push(selected);
        years.sort_unstable();
    }

    let mut html = format!(
        "<form class=\"year-select\" method=\"get\" action=\"{}\">\n<label for=\"jahr\">Jahr</label>\n<select id=\"jahr\" name=\"jahr\" onchange=\"this.form.submit()\">\n",
        escape(path)
    );
    for year in years {
        let attr = if year == selected { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{year}\"{attr}>{year}</option>\n"));
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Anzeigen</button></noscript>\n</form>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_select_marks_selection() {
        let html = render_year_select("/monatlicher-handelsverlauf", &[2023, 2024], 2024);
        assert!(html.contains("<option value=\"2024\" selected>2024</option>"));
        assert!(html.contains("<option value=\"2023\">2023</option>"));
    }

    #[test]
    fn test_year_select_keeps_unknown_selection() {
        let html = render_year_select("/top-10-handelspartner", &[2024], 1999);
        assert!(html.contains("<option value=\"1999\" selected>1999</option>"));
        assert!(html.find("1999").unwrap() < html.find("2024").unwrap());
    }

    #[test]
    fn test_layout_escapes_title() {
        let html = render_layout("A & B", &[], "/", "<p>x</p>", "f");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<p>x</p>"));
    }
}
