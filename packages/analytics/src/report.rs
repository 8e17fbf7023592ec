//! HTML rendering of an [`AreaReport`] for the results panel.

use std::fmt::Write as _;

use pothole_map_analytics_models::AreaReport;

/// Renders the report as an HTML fragment.
///
/// Every value in the report is numeric, so nothing needs escaping here.
#[must_use]
pub fn render_html(report: &AreaReport) -> String {
    let mut html = String::from("<h2>Area Analysis Report</h2>\n");
    let _ = writeln!(html, "<p>Latitude: {}</p>", report.center.latitude);
    let _ = writeln!(html, "<p>Longitude: {}</p>", report.center.longitude);
    let _ = writeln!(html, "<p>Radius: {} km</p>", report.radius_km);
    let _ = writeln!(
        html,
        "<p>Number of Potholes Detected: {}</p>",
        report.matched_count
    );
    let _ = writeln!(html, "<p>Average Severity: {}</p>", report.average_severity);

    if !report.by_severity.is_empty() {
        html.push_str("<ul>\n");
        for bucket in &report.by_severity {
            let _ = writeln!(html, "<li>{}: {}</li>", bucket.severity, bucket.count);
        }
        html.push_str("</ul>\n");
    }

    html
}
