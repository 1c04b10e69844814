/// Renders the interstitial page shown before following a short link.
///
/// Both values are HTML-escaped. The "Continue" link is only rendered for
/// `http` and `https` destinations.
pub fn render_preview(short_url: &str, destination: &str) -> String {
    let short_url = escape_html(short_url);
    let shown = escape_html(destination);

    let action = if is_web_url(destination) {
        format!(
            r#"<a class="button" href="{shown}" rel="noopener noreferrer">Continue to website</a>"#
        )
    } else {
        String::from(
            r#"<p class="warning">This destination cannot be opened from a browser link.</p>"#,
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Leafy Shortener</title>
</head>
<body>
  <main>
    <h1>Leafy Shortener</h1>
    <p>You're about to visit</p>
    <p class="short-url">{short_url}</p>
    <p>This link leads to:</p>
    <p class="destination">{shown}</p>
    {action}
    <a href="/">&larr; Back to Leafy Shortener</a>
  </main>
</body>
</html>
"#
    )
}

fn is_web_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
