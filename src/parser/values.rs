//! Line-level parsers for CAM key/value syntax.

/// A single `key=value` line in one of its CAM forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLine<'a> {
    /// `Key=value` or `Key="value"`.
    Plain { key: &'a str, value: &'a str },
    /// `Key[lang]="value"`.
    Localized {
        key: &'a str,
        lang: &'a str,
        value: &'a str,
    },
}

/// Parse a `[name]` section header line.
pub fn parse_section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        Some(&trimmed[1..trimmed.len() - 1])
    } else {
        None
    }
}

/// Parse a key=value pair from a line.
pub fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim_end();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Strip one pair of surrounding double quotes, if present.
pub fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse a key line in any of its three forms.
pub fn parse_key_line(line: &str) -> Option<KeyLine<'_>> {
    let (key, value) = parse_key_value(line)?;

    if let Some(open) = key.find('[') {
        if key.ends_with(']') && open > 0 {
            let lang = &key[open + 1..key.len() - 1];
            if !lang.is_empty() {
                return Some(KeyLine::Localized {
                    key: &key[..open],
                    lang,
                    value: strip_quotes(value),
                });
            }
        }
        return None;
    }

    Some(KeyLine::Plain {
        key,
        value: strip_quotes(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("[CAM Processor Job]"), Some("CAM Processor Job"));
        assert_eq!(parse_section_header("  [Sec_1]  "), Some("Sec_1"));
        assert_eq!(parse_section_header("Name[en]=\"x\""), None);
        assert_eq!(parse_section_header("[]"), Some(""));
        assert_eq!(parse_section_header("["), None);
    }

    #[test]
    fn test_parse_quoted_value() {
        assert_eq!(
            parse_key_line("Device=\"GERBER_RS274X\""),
            Some(KeyLine::Plain {
                key: "Device",
                value: "GERBER_RS274X"
            })
        );
    }

    #[test]
    fn test_parse_raw_value() {
        assert_eq!(
            parse_key_line("Section=Sec_1"),
            Some(KeyLine::Plain {
                key: "Section",
                value: "Sec_1"
            })
        );
    }

    #[test]
    fn test_quoted_value_keeps_inner_spaces() {
        let line = parse_key_line("Layers=\" 1 17 18\"").expect("Should parse");
        assert_eq!(
            line,
            KeyLine::Plain {
                key: "Layers",
                value: " 1 17 18"
            }
        );
    }

    #[test]
    fn test_parse_localized_value() {
        let line = parse_key_line("Name[en]=\"Component side\"").expect("Should parse");
        assert_eq!(
            line,
            KeyLine::Localized {
                key: "Name",
                lang: "en",
                value: "Component side"
            }
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let line = parse_key_line("Description[en]=\"a=b\"").expect("Should parse");
        assert_eq!(
            line,
            KeyLine::Localized {
                key: "Description",
                lang: "en",
                value: "a=b"
            }
        );
    }

    #[test]
    fn test_empty_quoted_value() {
        assert_eq!(
            parse_key_line("Prompt=\"\""),
            Some(KeyLine::Plain {
                key: "Prompt",
                value: ""
            })
        );
    }

    #[test]
    fn test_reject_malformed_lines() {
        assert_eq!(parse_key_line("no equals sign"), None);
        assert_eq!(parse_key_line("=value"), None);
        assert_eq!(parse_key_line("Name[]=\"x\""), None);
    }
}
