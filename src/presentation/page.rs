// Dashboard HTML page
use crate::domain::metrics::{MetricId, Selection};

const FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Lato:wght@400;700&display=swap";

const STYLE: &str = "\
body { font-family: 'Lato', sans-serif; margin: 0; background-color: #f7f7f7; }
.header { background-color: #222222; padding: 16px 0 24px; text-align: center; }
.header-emoji { font-size: 48px; margin: 0 auto; }
.header-title { color: #ffffff; font-size: 48px; font-weight: bold; margin: 4px auto; }
.header-description { color: #cfcfcf; margin: 4px auto; max-width: 384px; }
.menu { max-width: 960px; margin: -16px auto 0; padding: 12px 24px; background: #ffffff; \
box-shadow: 0 4px 6px 0 rgba(0, 0, 0, 0.18); }
.menu label { margin-right: 16px; white-space: nowrap; }
.graph { max-width: 960px; margin: 24px auto; background: #ffffff; \
box-shadow: 0 4px 6px 0 rgba(0, 0, 0, 0.18); }
.graph img { display: block; width: 100%; }
";

const SCRIPT: &str = "\
const boxes = document.querySelectorAll('#metrics-checklist input[name=metric]');
const graph = document.getElementById('combined-graph');
function refresh() {
  const selected = Array.from(boxes).filter(b => b.checked).map(b => b.value);
  graph.src = '/chart.svg?metrics=' + encodeURIComponent(selected.join(','));
}
boxes.forEach(b => b.addEventListener('change', refresh));
";

/// Escape text for HTML attribute and element content
fn escape(text: &str) -> String {
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

/// Chart URL for a selection, in canonical metric order
pub fn chart_url(selection: &Selection) -> String {
    let list: Vec<&str> = MetricId::ALL
        .into_iter()
        .filter(|m| selection.contains(*m))
        .map(MetricId::column)
        .collect();
    format!("/chart.svg?metrics={}", urlencoding::encode(&list.join(",")))
}

pub fn render_page(title: &str, selection: &Selection) -> String {
    let checklist: String = MetricId::ALL
        .into_iter()
        .map(|metric| {
            format!(
                "<label><input type=\"checkbox\" name=\"metric\" value=\"{}\"{}> {}</label>",
                escape(metric.column()),
                if selection.contains(metric) { " checked" } else { "" },
                escape(metric.label())
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<link rel=\"stylesheet\" href=\"{font}\">
<style>{STYLE}</style>
</head>
<body>
<div class=\"header\">
<p class=\"header-emoji\">📈</p>
<h1 class=\"header-title\">Website Analytics</h1>
<p class=\"header-description\">Analyze the performance of a simulated social media website</p>
</div>
<div class=\"menu\">
<p>Select Metrics to Display:</p>
<div id=\"metrics-checklist\">{checklist}</div>
</div>
<div class=\"graph\">
<img id=\"combined-graph\" alt=\"Website analytics chart\" src=\"{chart}\">
</div>
<script>{SCRIPT}</script>
</body>
</html>
",
        title = escape(title),
        font = escape(FONT_STYLESHEET),
        chart = escape(&chart_url(selection)),
    )
}
