//! HTML page rendering
//!
//! Every function here is pure: data in, page out. Text that came from the
//! user or the provider goes through [`escape`] before it reaches the markup.

use std::fmt::Write;

use axum::response::Html;

use crate::models::{ForecastDay, HistoryEntry, LocationResult};

/// Suggestions offered by the search box
const SUGGESTED_PLACES: [&str; 8] = [
    "New York", "London", "Paris", "Tokyo", "Sydney", "Berlin", "Moscow", "Toronto",
];

const ICON_BASE_URL: &str = "https://www.weatherbit.io/static/img/icons";

/// Escape text for use in HTML content and double-quoted attributes
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, bg_color: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background-color: {bg_color};
        }}
        nav a {{ margin-right: 15px; }}
        table {{ border-collapse: collapse; margin-bottom: 20px; }}
        th, td {{ padding: 6px 12px; border-bottom: 1px solid #ccc; text-align: center; }}
        .error {{ color: #b00020; border: 1px solid #b00020; padding: 10px; }}
        .entry {{ margin-bottom: 30px; }}
    </style>
</head>
<body>
    <nav><a href="/">Home</a><a href="/history">History</a></nav>
{body}
</body>
</html>"#,
        title = escape(title),
        bg_color = escape(bg_color),
    ))
}

fn forecast_table(days: &[ForecastDay]) -> String {
    let rows: String = days
        .iter()
        .map(|day| {
            format!(
                r#"        <tr>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
            <td>{}%</td>
            <td><img src="{ICON_BASE_URL}/{}.png" alt="{}" width="40"></td>
        </tr>
"#,
                escape(&day.date),
                ForecastDay::format_temperature(day.temp_day),
                ForecastDay::format_temperature(day.temp_night),
                day.humidity,
                escape(&day.icon),
                escape(&day.icon),
            )
        })
        .collect();

    format!(
        r#"    <table>
        <tr><th>Date</th><th>Day</th><th>Night</th><th>Humidity</th><th></th></tr>
{rows}    </table>
"#
    )
}

pub fn home(bg_color: &str) -> Html<String> {
    let options: String = SUGGESTED_PLACES
        .iter()
        .map(|place| format!(r#"<option value="{place}">"#))
        .collect();

    let body = format!(
        r#"    <h1>Weather Forecast</h1>
    <form action="/weather" method="post">
        <label for="location">Location</label>
        <input type="text" id="location" name="location" list="places" required>
        <datalist id="places">{options}</datalist>
        <button type="submit">Get forecast</button>
    </form>"#
    );
    layout("Weather Forecast", bg_color, &body)
}

/// Forecast page, or the same page carrying an error banner
pub fn weather(bg_color: &str, outcome: Result<&LocationResult, &str>) -> Html<String> {
    let body = match outcome {
        Ok(result) => format!(
            "    <h1>Weather in {}</h1>\n{}",
            escape(&result.display_name()),
            forecast_table(&result.forecast)
        ),
        Err(message) => format!(
            "    <h1>Weather</h1>\n    <div class=\"error\">{}</div>",
            escape(message)
        ),
    };
    layout("Weather", bg_color, &body)
}

/// Full search history; the download link is shown only when `download_name` is set
pub fn history(
    bg_color: &str,
    entries: &[HistoryEntry],
    download_name: Option<&str>,
) -> Html<String> {
    let mut body = String::from("    <h1>Search History</h1>\n");

    if entries.is_empty() {
        body.push_str("    <p class=\"empty\">No searches yet.</p>\n");
    } else {
        if let Some(name) = download_name {
            let _ = writeln!(
                body,
                r#"    <p><a href="/download?file={}">Download history</a></p>"#,
                escape(&urlencoding::encode(name))
            );
        }
        for entry in entries {
            let _ = write!(
                body,
                concat!(
                    "    <div class=\"entry\">\n",
                    "    <h2>{}</h2>\n",
                    "    <p>Searched at {} &middot; {}</p>\n",
                    "{}    </div>\n"
                ),
                escape(&entry.location),
                entry.format_date(),
                escape(&entry.data.display_name()),
                forecast_table(&entry.data.forecast)
            );
        }
    }

    layout("Search History", bg_color, &body)
}

pub fn not_found(bg_color: &str) -> Html<String> {
    layout(
        "404 Not Found",
        bg_color,
        "    <h1>404 - Page Not Found</h1>\n    <p>The page you requested does not exist.</p>",
    )
}

pub fn method_not_allowed(bg_color: &str) -> Html<String> {
    layout(
        "405 Method Not Allowed",
        bg_color,
        concat!(
            "    <h1>405 - Method Not Allowed</h1>\n",
            "    <p>This page does not accept that kind of request.</p>"
        ),
    )
}

pub fn internal_error(bg_color: &str, message: &str) -> Html<String> {
    let body = format!(
        "    <h1>500 - Internal Server Error</h1>\n    <div class=\"error\">{}</div>",
        escape(message)
    );
    layout("500 Internal Server Error", bg_color, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::canned_forecast;
    use chrono::NaiveDateTime;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("Zürich"), "Zürich");
    }

    #[test]
    fn test_every_page_uses_background_color() {
        let result = canned_forecast();
        let pages = [
            home("peachpuff"),
            weather("peachpuff", Ok(&result)),
            weather("peachpuff", Err("boom")),
            history("peachpuff", &[], None),
            not_found("peachpuff"),
            method_not_allowed("peachpuff"),
            internal_error("peachpuff", "disk full"),
        ];
        for Html(page) in pages {
            assert!(page.contains("background-color: peachpuff;"));
        }
    }

    #[test]
    fn test_weather_page_lists_days() {
        let result = canned_forecast();
        let Html(page) = weather("white", Ok(&result));
        assert!(page.contains("Weather in Test City, Test Country"));
        assert_eq!(page.matches("<tr>").count(), 8);
        assert!(page.contains("<td>27.05</td>"));
        assert!(page.contains("<td>19.3°C</td>"));
        assert!(page.contains("<td>49%</td>"));
        assert!(page.contains("/c01d.png"));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn test_weather_page_error_banner() {
        let Html(page) = weather("white", Err("Error fetching weather data: 404 - Not Found"));
        assert!(page.contains(
            r#"<div class="error">Error fetching weather data: 404 - Not Found</div>"#
        ));
        assert!(!page.contains("<table>"));
    }

    #[test]
    fn test_history_empty_state() {
        let Html(page) = history("white", &[], Some("search_history.json"));
        assert!(page.contains("No searches yet."));
        assert!(!page.contains("Download history"));
    }

    fn entry(location: &str) -> HistoryEntry {
        HistoryEntry {
            location: location.to_string(),
            date: NaiveDateTime::parse_from_str("2024-05-27 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            data: canned_forecast(),
        }
    }

    #[test]
    fn test_history_entries_are_escaped() {
        let name = Some("data/search history.json");
        let Html(page) = history("white", &[entry("<b>test</b>")], name);
        assert!(page.contains("<h2>&lt;b&gt;test&lt;/b&gt;</h2>"));
        assert!(page.contains("Searched at 2024-05-27 10:00:00"));
        assert!(page.contains("/download?file=data%2Fsearch%20history.json"));
    }

    #[test]
    fn test_history_without_download_name_has_no_link() {
        let Html(page) = history("white", &[entry("test")], None);
        assert!(page.contains("<h2>test</h2>"));
        assert!(!page.contains("Download history"));
        assert!(!page.contains("/download?file="));
    }
}
