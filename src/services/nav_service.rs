use lazy_static::lazy_static;

use crate::models::{NavNode, PLACEHOLDER_PATH};
use crate::services::page_service::DashboardPage;
use crate::utils::html::escape;

const SINCE_2008: &str = "Gesamtüberblick seit 2008 bis 2024";
const BY_YEAR: &str = "Überblick nach bestimmtem Jahr";

lazy_static! {
    /// Sidebar menu. Leaves with a `#` path are planned pages.
    pub static ref NAVIGATION: Vec<NavNode> = vec![
        NavNode::group(
            "Überblick über Deutschlands Handel",
            vec![
                NavNode::group(
                    SINCE_2008,
                    vec![NavNode::leaf(
                        "Gesamter Export-, Import- und Handelsvolumen-Verlauf Deutschlands",
                        DashboardPage::Overview.path(),
                    )],
                ),
                NavNode::group(
                    BY_YEAR,
                    vec![
                        NavNode::leaf("Monatlicher Handelsverlauf", DashboardPage::Monthly.path()),
                        NavNode::leaf("Top 10 Handelspartner", DashboardPage::TopPartners.path()),
                        NavNode::leaf("Länder mit größten Export- und Importzuwächsen (absolut)", PLACEHOLDER_PATH),
                        NavNode::leaf("Länder mit größten Export- und Importzuwächsen (relativ)", PLACEHOLDER_PATH),
                        NavNode::leaf("Top 10 Waren", PLACEHOLDER_PATH),
                        NavNode::leaf("Waren mit größten Export- und Importzuwächsen (absolut)", PLACEHOLDER_PATH),
                        NavNode::leaf("Waren mit größten Export- und Importzuwächsen (relativ)", PLACEHOLDER_PATH),
                    ],
                ),
            ],
        ),
        NavNode::group(
            "Länderanalyse",
            vec![
                NavNode::group(
                    SINCE_2008,
                    vec![
                        NavNode::leaf("Gesamter Export-, Import- und Handelsvolumen-Verlauf mit Deutschland", PLACEHOLDER_PATH),
                        NavNode::leaf("Vergleich mit anderen Ländern", PLACEHOLDER_PATH),
                        NavNode::leaf("Export- und Importwachstumsrate", PLACEHOLDER_PATH),
                        NavNode::leaf("Platzierung im Export- und Importranking Deutschlands", PLACEHOLDER_PATH),
                        NavNode::leaf("Deutschlands Top 10 Waren im Handel", PLACEHOLDER_PATH),
                    ],
                ),
                NavNode::group(
                    BY_YEAR,
                    vec![
                        NavNode::leaf("Handelsbilanz & Ranking", PLACEHOLDER_PATH),
                        NavNode::leaf("Monatlicher Handelsverlauf", PLACEHOLDER_PATH),
                        NavNode::leaf("Top 10 Export- und Importwaren", PLACEHOLDER_PATH),
                        NavNode::leaf("Top 4 Waren nach Differenz zum Vorjahr", PLACEHOLDER_PATH),
                        NavNode::leaf("Top 4 Waren nach Wachstum zum Vorjahr", PLACEHOLDER_PATH),
                    ],
                ),
            ],
        ),
        NavNode::group(
            "Warenanalyse",
            vec![NavNode::group(
                SINCE_2008,
                vec![
                    NavNode::leaf("Gesamter Export- und Importverlauf der Ware", PLACEHOLDER_PATH),
                    NavNode::leaf("Deutschlands Top 5 Export- und Importländer der Ware", PLACEHOLDER_PATH),
                ],
            )],
        ),
    ];
}

/// Find the first leaf that links to `path`
pub fn find_leaf<'a>(nodes: &'a [NavNode], path: &str) -> Option<&'a NavNode> {
    nodes.iter().find_map(|node| match node {
        NavNode::Leaf { path: p, .. } if p != PLACEHOLDER_PATH && p == path => Some(node),
        NavNode::Leaf { .. } => None,
        NavNode::Group { children, .. } => find_leaf(children, path),
    })
}

/// Sidebar as nested collapsed accordions.
/// Groups on the way to `active_path` start open and its leaf is highlighted.
pub fn render_sidebar(nodes: &[NavNode], active_path: &str) -> String {
    let mut html = String::from("<nav class=\"sidebar\">\n<h2>Navigation</h2>\n<hr>\n");
    for node in nodes {
        render_node(node, active_path, &mut html);
    }
    html.push_str("</nav>\n");
    html
}

fn render_node(node: &NavNode, active_path: &str, html: &mut String) {
    match node {
        NavNode::Group { title, children } => {
            let open = if node.contains_path(active_path) { " open" } else { "" };
            html.push_str(&format!(
                "<details class=\"nav-group\"{}>\n<summary>{}</summary>\n",
                open,
                escape(title)
            ));
            for child in children {
                render_node(child, active_path, html);
            }
            html.push_str("</details>\n");
        }
        NavNode::Leaf { title, path } => {
            let class = if node.is_placeholder() {
                "nav-link placeholder"
            } else if path == active_path {
                "nav-link active"
            } else {
                "nav-link"
            };
            html.push_str(&format!(
                "<a class=\"{}\" href=\"{}\">{}</a>\n",
                class,
                escape(path),
                escape(title)
            ));
        }
    }
}
