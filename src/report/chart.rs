//! Bar chart rendering
//!
//! Renders problem counts as an inline SVG column chart so the dashboard
//! needs no client-side scripting.

use std::fmt::Write;

use super::counts::ProblemCount;

/// Bar colors, cycled per bar
pub const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

const CHART_HEIGHT: u32 = 240;
const BAR_WIDTH: u32 = 48;
const BAR_GAP: u32 = 24;
const MARGIN_LEFT: u32 = 40;
const MARGIN_BOTTOM: u32 = 60;
const MARGIN_TOP: u32 = 20;

/// Render counts as an SVG column chart
pub fn render_bar_chart_svg(counts: &[ProblemCount]) -> String {
    if counts.is_empty() {
        return format!(
            r##"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="320" height="{h}" role="img" aria-label="No problems recorded"><text x="160" y="{y}" text-anchor="middle" fill="#888">No problems recorded</text></svg>"##,
            h = CHART_HEIGHT,
            y = CHART_HEIGHT / 2
        );
    }

    let max = counts.iter().map(|c| c.count).max().unwrap_or(1).max(1);
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let width = MARGIN_LEFT + counts.len() as u32 * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
    let baseline = MARGIN_TOP + plot_height;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{CHART_HEIGHT}" role="img" aria-label="Records per problem">"#
    );

    // Axis and max gridline
    let _ = write!(
        svg,
        r##"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{width}" y2="{baseline}" stroke="#999"/>"##
    );
    let _ = write!(
        svg,
        r##"<text x="{x}" y="{y}" text-anchor="end" font-size="11" fill="#666">{max}</text>"##,
        x = MARGIN_LEFT - 6,
        y = MARGIN_TOP + 4
    );

    for (idx, entry) in counts.iter().enumerate() {
        let bar_height = (entry.count as u64 * plot_height as u64 / max as u64) as u32;
        let x = MARGIN_LEFT + BAR_GAP + idx as u32 * (BAR_WIDTH + BAR_GAP);
        let y = baseline - bar_height;
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        let label = escape_html(&entry.problem);

        let _ = write!(
            svg,
            r#"<g><title>{label}: {count}</title><rect x="{x}" y="{y}" width="{BAR_WIDTH}" height="{bar_height}" fill="{color}"/>"#,
            count = entry.count
        );
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{ty}" text-anchor="middle" font-size="11">{count}</text>"#,
            cx = x + BAR_WIDTH / 2,
            ty = y.saturating_sub(4),
            count = entry.count
        );
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{ly}" text-anchor="end" font-size="11" transform="rotate(-35 {cx} {ly})">{label}</text></g>"#,
            cx = x + BAR_WIDTH / 2,
            ly = baseline + 14
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Escape text for HTML element and attribute content
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(problem: &str, count: usize) -> ProblemCount {
        ProblemCount {
            problem: problem.to_string(),
            count,
        }
    }

    #[test]
    fn test_one_bar_per_problem() {
        let svg = render_bar_chart_svg(&[count("Leak", 3), count("Jam", 1)]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("Leak: 3"));
        assert!(svg.contains(SERIES_COLORS[1]));
    }

    #[test]
    fn test_tallest_bar_fills_plot() {
        let svg = render_bar_chart_svg(&[count("Leak", 4), count("Jam", 2)]);
        let plot = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        assert!(svg.contains(&format!(r#"height="{}""#, plot)));
        assert!(svg.contains(&format!(r#"height="{}""#, plot / 2)));
    }

    #[test]
    fn test_labels_escaped() {
        let svg = render_bar_chart_svg(&[count("<script>", 1)]);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_chart() {
        let svg = render_bar_chart_svg(&[]);
        assert!(svg.contains("No problems recorded"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a & "b" <c> 'd'"#), "a &amp; &quot;b&quot; &lt;c&gt; &#39;d&#39;");
    }
}
