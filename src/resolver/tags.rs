//! HTML markup for resolved script and stylesheet URLs.

/// Escape a value for use inside a double- or single-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for ch in value.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#039;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}

/// `<script type="module">` tag for an already resolved URL.
pub fn module_script(src: &str) -> String {
  format!(r#"<script type="module" src="{}"></script>"#, escape_attr(src))
}

/// `<script type="module">` tag with `src` inserted verbatim.
///
/// Used for dev-server URLs, which carry the caller's entry unchanged.
pub fn raw_module_script(src: &str) -> String {
  format!(r#"<script type="module" src="{src}"></script>"#)
}

/// `<link rel="stylesheet">` tag for an already resolved URL.
pub fn stylesheet_link(href: &str) -> String {
  format!(r#"<link rel="stylesheet" href="{}">"#, escape_attr(href))
}
