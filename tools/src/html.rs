//! HTML rendering for the desk pages. Charts are inline SVG.

use channel_desk_core::{
    desk::PageView,
    form::{FieldKind, FormField},
    overview::{ChartKind, ChartSeries, DeskTotals, Overview},
    page::Page,
    record::{format_date, Collection, SettlementStatus},
    session::GateState,
    table::Table,
};
use chrono::NaiveDate;
use std::fmt::Write;

/// Feedback shown above a page's form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Added,
    Invalid(String),
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;display:flex;min-height:100vh;color:#222}\
nav{width:220px;background:#f3f4f7;padding:1rem;box-sizing:border-box}\
nav a{display:block;padding:.4rem .6rem;border-radius:4px;color:#222;text-decoration:none}\
nav a.current{background:#dde3f0;font-weight:600}\
main{flex:1;padding:1.5rem 2rem}\
table{border-collapse:collapse;width:100%;margin-top:1rem}\
th,td{border:1px solid #ddd;padding:.35rem .6rem;text-align:left}\
th{background:#f7f7f9}\
.notice{padding:.6rem 1rem;border-radius:4px;margin:1rem 0}\
.ok{background:#e6f4ea}.err{background:#fce8e6}\
.charts{display:flex;gap:2rem;flex-wrap:wrap}\
.totals{display:flex;gap:1rem;flex-wrap:wrap;margin:1rem 0}\
.totals div{background:#f7f7f9;padding:.6rem 1rem;border-radius:4px}\
form label{display:block;margin:.5rem 0}\
.login{margin:4rem auto;max-width:320px}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>",
        escape(title)
    )
}

// ── Login ──────────────────────────────────────────────────────

/// Password prompt. `page` rides along in the form so a successful login
/// lands where the visitor was heading.
pub fn login_page(title: &str, gate: GateState, page: Page) -> String {
    let prompt = match gate {
        GateState::Retry => "Wrong password, please retry",
        _ => "Enter password",
    };
    let body = format!(
        "<main class=\"login\"><h1>{}</h1>\
         <form method=\"post\" action=\"/login\">\
         <input type=\"hidden\" name=\"page\" value=\"{}\">\
         <label>{prompt}<br><input type=\"password\" name=\"password\" autofocus></label>\
         <button type=\"submit\">Unlock</button></form></main>",
        escape(title),
        page.slug()
    );
    document(title, &body)
}

// ── Error pages ────────────────────────────────────────────────

pub fn error_page(title: &str, heading: &str, message: &str) -> String {
    let body = format!(
        "<main><h1>{}</h1><p>{}</p><p><a href=\"/\">Back</a></p></main>",
        escape(heading),
        escape(message)
    );
    document(title, &body)
}

// ── Pages ──────────────────────────────────────────────────────

fn sidebar(title: &str, current: Page) -> String {
    let mut nav = format!("<nav><h2>{}</h2>", escape(title));
    for page in Page::ALL {
        let class = if page == current { " class=\"current\"" } else { "" };
        let _ = write!(nav, "<a href=\"/{}\"{class}>{}</a>", page.slug(), page.label());
    }
    nav.push_str("</nav>");
    nav
}

pub fn desk_page(
    title: &str,
    page: Page,
    view: &PageView,
    notice: Option<&Notice>,
    today: NaiveDate,
) -> String {
    let mut main = format!("<main><h1>{}</h1>", page.heading());
    match view {
        PageView::Overview(overview) => main.push_str(&overview_panel(overview)),
        PageView::Collection { collection, table } => {
            if let Some(notice) = notice {
                main.push_str(&notice_banner(notice));
            }
            let open = matches!(notice, Some(Notice::Invalid(_)));
            main.push_str(&entry_form(page, *collection, open, today));
            main.push_str(&table_html(table));
        }
    }
    main.push_str("</main>");
    document(title, &format!("{}{main}", sidebar(title, page)))
}

fn notice_banner(notice: &Notice) -> String {
    match notice {
        Notice::Added => "<div class=\"notice ok\">Added successfully!</div>".to_string(),
        Notice::Invalid(reason) => {
            format!("<div class=\"notice err\">{}</div>", escape(reason))
        }
    }
}

fn entry_form(page: Page, collection: Collection, open: bool, today: NaiveDate) -> String {
    let mut form = format!(
        "<details{}><summary>Add new {}</summary><form method=\"post\" action=\"/{}\">",
        if open { " open" } else { "" },
        page.item_noun(),
        page.slug()
    );
    for field in collection.form_fields() {
        form.push_str(&input(field, today));
    }
    form.push_str("<button type=\"submit\">Add</button></form></details>");
    form
}

fn input(field: &FormField, today: NaiveDate) -> String {
    let control = match field.kind {
        FieldKind::Text => format!("<input type=\"text\" name=\"{}\">", field.name),
        FieldKind::Amount => format!(
            "<input type=\"number\" name=\"{}\" min=\"0\" step=\"0.01\" value=\"0.00\">",
            field.name
        ),
        FieldKind::Date => format!(
            "<input type=\"date\" name=\"{}\" value=\"{}\">",
            field.name,
            format_date(today)
        ),
        FieldKind::Status => {
            let mut select = format!("<select name=\"{}\">", field.name);
            for status in SettlementStatus::ALL {
                let _ = write!(select, "<option value=\"{status}\">{}</option>", status.label());
            }
            select.push_str("</select>");
            select
        }
    };
    format!("<label>{}<br>{control}</label>", field.label)
}

pub fn table_html(table: &Table) -> String {
    if table.is_empty() {
        return "<p>No records yet.</p>".to_string();
    }
    let mut html = String::from("<table><thead><tr>");
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

// ── Overview ───────────────────────────────────────────────────

fn overview_panel(overview: &Overview) -> String {
    let mut html = totals_strip(&overview.totals);
    html.push_str("<div class=\"charts\">");
    for series in [&overview.revenue_trend, &overview.collections] {
        if !series.is_empty() {
            html.push_str(&chart_svg(series));
        }
    }
    html.push_str("</div>");
    html
}

fn totals_strip(totals: &DeskTotals) -> String {
    let items = [
        ("Channels", totals.channels.to_string()),
        ("Products", totals.products.to_string()),
        ("Revenue", format!("{:.2}", totals.revenue)),
        ("Revenue share", format!("{:.2}", totals.share)),
        ("Pending settlement", format!("{:.2}", totals.settlement_pending)),
        ("Settled", format!("{:.2}", totals.settlement_settled)),
        ("Collected", format!("{:.2}", totals.collected)),
    ];
    let mut html = String::from("<div class=\"totals\">");
    for (label, value) in items {
        let _ = write!(html, "<div>{label}<br><strong>{value}</strong></div>");
    }
    html.push_str("</div>");
    html
}

const CHART_W: f64 = 480.0;
const CHART_H: f64 = 260.0;
const MARGIN: f64 = 40.0;

pub fn chart_svg(series: &ChartSeries) -> String {
    let plot_w = CHART_W - 2.0 * MARGIN;
    let plot_h = CHART_H - 2.0 * MARGIN;
    let max = match series.max_value() {
        m if m > 0.0 => m,
        _ => 1.0,
    };
    let n = series.points.len();
    let slot = plot_w / n as f64;
    let x_of = |i: usize| MARGIN + slot * (i as f64 + 0.5);
    let y_of = |v: f64| MARGIN + plot_h - v / max * plot_h;

    let mut svg = format!(
        "<figure><figcaption>{}</figcaption>\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_W}\" height=\"{CHART_H}\" \
         viewBox=\"0 0 {CHART_W} {CHART_H}\" role=\"img\">",
        escape(series.title)
    );
    let base = MARGIN + plot_h;
    let _ = write!(
        svg,
        "<line x1=\"{MARGIN}\" y1=\"{base}\" x2=\"{}\" y2=\"{base}\" stroke=\"#888\"/>\
         <line x1=\"{MARGIN}\" y1=\"{MARGIN}\" x2=\"{MARGIN}\" y2=\"{base}\" stroke=\"#888\"/>\
         <text x=\"2\" y=\"{}\" font-size=\"10\">{:.0}</text>",
        MARGIN + plot_w,
        MARGIN + 4.0,
        max
    );

    match series.kind {
        ChartKind::Line => {
            let points: Vec<String> = series
                .points
                .iter()
                .enumerate()
                .map(|(i, (_, v))| format!("{:.1},{:.1}", x_of(i), y_of(*v)))
                .collect();
            let _ = write!(
                svg,
                "<polyline fill=\"none\" stroke=\"#3366cc\" stroke-width=\"2\" points=\"{}\"/>",
                points.join(" ")
            );
        }
        ChartKind::Bar => {
            for (i, (_, v)) in series.points.iter().enumerate() {
                let y = y_of(*v);
                let _ = write!(
                    svg,
                    "<rect x=\"{:.1}\" y=\"{y:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"#3366cc\"/>",
                    x_of(i) - slot * 0.35,
                    slot * 0.7,
                    base - y
                );
            }
        }
    }

    // Label at most ~8 ticks so long series stay readable.
    let step = n.div_ceil(8).max(1);
    for (i, (label, _)) in series.points.iter().enumerate().step_by(step) {
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
            x_of(i),
            base + 14.0,
            escape(label)
        );
    }
    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"middle\">{}</text>",
        MARGIN + plot_w / 2.0,
        CHART_H - 4.0,
        escape(series.x_label)
    );
    let mid = MARGIN + plot_h / 2.0;
    let _ = write!(
        svg,
        "<text x=\"12\" y=\"{mid:.1}\" font-size=\"11\" text-anchor=\"middle\" \
         transform=\"rotate(-90 12 {mid:.1})\">{}</text>",
        escape(series.y_label)
    );
    svg.push_str("</svg></figure>");
    svg
}
