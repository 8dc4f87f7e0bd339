/* src/server/core/rust/src/escape.rs */

/// Escape text for an HTML text node or a double-quoted attribute value.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

/// Make serialized JSON safe to embed inside a `<script type="application/json">`
/// element.
///
/// Non-ASCII codepoints become `\uXXXX` (surrogate pairs outside the BMP) so the
/// island survives any response charset. `<`, `>` and `&` are escaped as well,
/// which keeps a `</script>` inside a product name from closing the element.
/// These characters can only occur inside JSON strings, so the escapes stay
/// valid JSON.
pub fn escape_json_for_script(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  for ch in json.chars() {
    match ch {
      '<' => out.push_str("\\u003c"),
      '>' => out.push_str("\\u003e"),
      '&' => out.push_str("\\u0026"),
      c if (c as u32) > 0x7F => {
        let code = c as u32;
        if code > 0xFFFF {
          let adjusted = code - 0x1_0000;
          let hi = (adjusted >> 10) + 0xD800;
          let lo = (adjusted & 0x3FF) + 0xDC00;
          out.push_str(&format!("\\u{hi:04x}\\u{lo:04x}"));
        } else {
          out.push_str(&format!("\\u{code:04x}"));
        }
      }
      c => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_html_special_chars() {
    assert_eq!(escape_html("<>&\"'"), "&lt;&gt;&amp;&quot;&#x27;");
  }

  #[test]
  fn escape_html_safe_string() {
    assert_eq!(escape_html("Electronics"), "Electronics");
  }

  #[test]
  fn script_escape_blocks_closing_tag() {
    let json = r#"{"name":"</script><b>"}"#;
    let escaped = escape_json_for_script(json);
    assert!(!escaped.contains("</script>"));
    let back: serde_json::Value = serde_json::from_str(&escaped).unwrap();
    assert_eq!(back["name"], "</script><b>");
  }

  #[test]
  fn script_escape_non_ascii() {
    let escaped = escape_json_for_script(r#"{"name":"Café 🛒"}"#);
    assert!(escaped.is_ascii());
    assert!(escaped.contains("\\u00e9"));
    assert!(escaped.contains("\\ud83d\\uded2"));
    let back: serde_json::Value = serde_json::from_str(&escaped).unwrap();
    assert_eq!(back["name"], "Café 🛒");
  }
}
