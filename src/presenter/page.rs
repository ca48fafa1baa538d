//! Dashboard Page
//!
//! Server-rendered HTML for the dashboard and for the failure page shown
//! when a render cannot complete.

use std::fmt::Write;

use super::chart::line_chart_svg;
use super::format::{escape_html, format_cell};
use super::{HistoryRow, Overview};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0 auto; max-width: 1100px; padding: 24px; color: #1f2933; }
h1 { font-size: 1.8rem; }
h2 { font-size: 1.2rem; margin-top: 32px; }
.metrics { display: flex; gap: 48px; }
.metric-label { color: #616e7c; font-size: 0.9rem; }
.metric-value { font-size: 2rem; font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #e4e7eb; padding: 6px 12px; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.notice { background: #fff8e1; border-left: 4px solid #ffb300; padding: 8px 12px; }
.muted { color: #9aa5b1; font-size: 0.85rem; }
"#;

/// Render the full dashboard page
pub fn render_dashboard(overview: &Overview) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = escape_html(&overview.title),
    );

    render_metrics(&mut html, overview);

    html.push_str("<h2>NAV Trend (Historical)</h2>\n");
    if overview.excluded_undated > 0 {
        let _ = write!(
            html,
            "<p class=\"notice\">{} row(s) of the NAV log have unparseable dates and are not shown.</p>\n",
            overview.excluded_undated
        );
    }
    html.push_str(&line_chart_svg("NAV Over Time", &overview.chart_points()));
    html.push('\n');

    html.push_str("<h2>Daily Returns</h2>\n");
    render_table(&mut html, &overview.table);

    render_token_info(&mut html, overview);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_metrics(html: &mut String, overview: &Overview) {
    let _ = write!(
        html,
        "<div class=\"metrics\">\n<div class=\"metric\"><div class=\"metric-label\">Live NAV (on-chain)</div><div class=\"metric-value\">{}</div></div>\n<div class=\"metric\"><div class=\"metric-label\">Total Supply</div><div class=\"metric-value\">{}</div></div>\n</div>\n",
        escape_html(&overview.nav_display),
        escape_html(&overview.total_supply_display),
    );

    if let Some(block) = overview.block {
        let _ = write!(html, "<p class=\"muted\">Read at block {}</p>\n", block);
    }
}

fn render_table(html: &mut String, rows: &[HistoryRow]) {
    if rows.is_empty() {
        html.push_str("<p class=\"muted\">No NAV history recorded.</p>\n");
        return;
    }

    html.push_str(
        "<table>\n<thead><tr><th>Date</th><th>NAV</th><th>Daily Return</th></tr></thead>\n<tbody>\n",
    );

    for row in rows {
        let date = match (&row.date, &row.raw_date) {
            (Some(date), _) => date.format("%Y-%m-%d").to_string(),
            (None, Some(raw)) => format!("invalid: {}", escape_html(raw)),
            (None, None) => String::new(),
        };
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            date,
            format_cell(row.nav),
            format_cell(row.daily_return)
        );
    }

    html.push_str("</tbody>\n</table>\n");
}

fn render_token_info(html: &mut String, overview: &Overview) {
    let _ = write!(
        html,
        "<hr>\n<h2>Token Info</h2>\n<ul>\n<li><strong>Token Name:</strong> {name}</li>\n<li><strong>Symbol:</strong> {symbol}</li>\n<li><strong>Contract:</strong> <a href=\"{link}\" rel=\"noopener\" target=\"_blank\">View on block explorer</a> <span class=\"muted\">{contract}</span></li>\n</ul>\n",
        name = escape_html(&overview.name),
        symbol = escape_html(&overview.symbol),
        link = escape_html(&overview.explorer_link),
        contract = escape_html(&overview.contract),
    );
}

/// Generic failure page. Details go to the log, not the browser.
pub fn render_error(title: &str, request_id: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<p class=\"notice\">The dashboard could not be rendered. Please try again later.</p>\n<p class=\"muted\">Request ID: {request_id}</p>\n</body>\n</html>\n",
        title = escape_html(title),
        request_id = escape_html(request_id),
    )
}
