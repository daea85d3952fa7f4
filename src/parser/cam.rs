//! Main CAM job file parser.

use crate::config::JOB_HEADER_TAG;
use crate::error::{CamError, Result};
use crate::model::{CamJob, CamSection, CamValue};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::values::{parse_key_line, parse_section_header, KeyLine};

/// CAM job file parser.
pub struct CamParser {
    /// File content as lines.
    lines: Vec<String>,
    /// Section indices: (name, start_line, end_line).
    sections: Vec<(String, usize, usize)>,
}

impl CamParser {
    /// Create a new parser from file content.
    pub fn new(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<String> = content.lines().map(|s| s.trim_end().to_string()).collect();
        let sections = Self::find_sections(&lines);
        Self { lines, sections }
    }

    /// Find all sections and their line ranges.
    fn find_sections(lines: &[String]) -> Vec<(String, usize, usize)> {
        let mut sections = Vec::new();
        let mut current_section: Option<(String, usize)> = None;

        for (i, line) in lines.iter().enumerate() {
            if let Some(name) = parse_section_header(line) {
                if let Some((prev, start)) = current_section.take() {
                    sections.push((prev, start, i - 1));
                }
                current_section = Some((name.to_string(), i));
            }
        }

        if let Some((name, start)) = current_section {
            sections.push((name, start, lines.len() - 1));
        }

        sections
    }

    /// Get the body lines of a section by index (excluding the header line).
    fn section_lines(&self, index: usize) -> Vec<&str> {
        let (_, start, end) = &self.sections[index];
        self.lines[*start + 1..=*end]
            .iter()
            .map(|s| s.as_str())
            .collect()
    }

    /// First non-blank line, used in error reports.
    fn first_content_line(&self) -> String {
        self.lines
            .iter()
            .find(|l| !l.trim().is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// Parse the whole job.
    pub fn parse(&self) -> Result<CamJob> {
        let header_is_first = self.sections.first().is_some_and(|(name, start, _)| {
            name == JOB_HEADER_TAG && self.lines[..*start].iter().all(|l| l.trim().is_empty())
        });
        if !header_is_first {
            return Err(CamError::NotACamJob {
                found: self.first_content_line(),
            });
        }

        let mut job = CamJob::new();
        let header = ValueTable::from_lines(&self.section_lines(0));
        job.description = header.get("Description").cloned();
        job.declared = header.all_text("Section");
        if job.declared.is_empty() {
            return Err(CamError::NoSections);
        }
        debug!("Job declares {} section(s)", job.declared.len());

        for index in 1..self.sections.len() {
            let (tag, start, _) = &self.sections[index];
            if !job.is_declared(tag) {
                return Err(CamError::UndeclaredSection {
                    line: start + 1,
                    section: tag.clone(),
                });
            }
            let section = parse_section(tag, &self.section_lines(index))?;
            debug!(
                "Parsed section [{}] '{}' -> {}",
                section.tag,
                section.display_name(),
                section.output
            );
            job.sections.push(section);
        }

        Ok(job)
    }
}

/// Key lines of one section collected by key.
#[derive(Debug, Default)]
struct ValueTable {
    values: HashMap<String, CamValue>,
    /// Every plain value per key, for repeated keys like `Section=`.
    repeated: HashMap<String, Vec<String>>,
}

impl ValueTable {
    fn from_lines(lines: &[&str]) -> Self {
        let mut table = Self::default();

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            match parse_key_line(line) {
                Some(KeyLine::Plain { key, value }) => {
                    table
                        .repeated
                        .entry(key.to_string())
                        .or_default()
                        .push(value.to_string());
                    table
                        .values
                        .insert(key.to_string(), CamValue::Text(value.to_string()));
                }
                Some(KeyLine::Localized { key, lang, value }) => {
                    let entry = table
                        .values
                        .entry(key.to_string())
                        .or_insert_with(|| CamValue::Localized(Vec::new()));
                    match entry {
                        CamValue::Localized(entries) => {
                            entries.push((lang.to_string(), value.to_string()))
                        }
                        CamValue::Text(_) => {
                            *entry = CamValue::Localized(vec![(
                                lang.to_string(),
                                value.to_string(),
                            )])
                        }
                    }
                }
                None => debug!("Ignoring unrecognized line: {}", line),
            }
        }

        table
    }

    fn get(&self, key: &str) -> Option<&CamValue> {
        self.values.get(key)
    }

    fn all_text(&self, key: &str) -> Vec<String> {
        self.repeated
            .get(key)
            .map(|values| values.iter().filter(|v| !v.is_empty()).cloned().collect())
            .unwrap_or_default()
    }

    fn optional(&self, key: &str) -> Option<CamValue> {
        self.get(key).cloned()
    }

    fn required(&self, section: &str, key: &str) -> Result<CamValue> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(CamError::MissingField {
                section: section.to_string(),
                field: key.to_string(),
            }),
        }
    }
}

/// Parse the body of one `[Sec_N]` block.
pub fn parse_section(tag: &str, lines: &[&str]) -> Result<CamSection> {
    let table = ValueTable::from_lines(lines);

    Ok(CamSection {
        tag: tag.to_string(),
        name: table.optional("Name"),
        prompt: table.optional("Prompt"),
        device: table.required(tag, "Device")?,
        wheel: table.optional("Wheel"),
        rack: table.optional("Rack"),
        scale: table.optional("Scale"),
        output: table.required(tag, "Output")?,
        flags: table.required(tag, "Flags")?,
        emulate: table.required(tag, "Emulate")?,
        offset: table.required(tag, "Offset")?,
        sheet: table.optional("Sheet"),
        tolerance: table.optional("Tolerance"),
        pen: table.optional("Pen"),
        page: table.optional("Page"),
        layers: table.required(tag, "Layers")?,
        colors: table.optional("Colors"),
    })
}

/// Parse a CAM job file from a path.
pub fn parse_cam_file(path: &Path) -> Result<CamJob> {
    use std::fs;

    if !path.exists() {
        return Err(CamError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    if content.trim().is_empty() {
        return Err(CamError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    CamParser::new(&content).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SECTION_BODY: &[&str] = &[
        "Name[de]=\"Bestückungsseite\"",
        "Name[en]=\"Component side\"",
        "Prompt=\"\"",
        "Device=\"GERBER_RS274X\"",
        "Wheel=\".whl\"",
        "Rack=\"\"",
        "Scale=1",
        "Output=\"%N.cmp\"",
        "Flags=\"0 0 0 1 0 1 1\"",
        "Emulate=\"0\"",
        "Offset=\"0.0mil 0.0mil\"",
        "Sheet=1",
        "Tolerance=\"0 0 0 0 0 0\"",
        "Pen=\"0.0mil 0\"",
        "Page=\"12.0inch 16.0inch\"",
        "Layers=\" 1 17 18\"",
        "Colors=\" 0 1 2\"",
    ];

    fn two_section_job() -> String {
        let mut text = String::from(
            "[CAM Processor Job]\n\
             Description[en]=\"<b>Two layer job</b>\"\n\
             Section=Sec_1\n\
             Section=Sec_2\n\n\
             [Sec_1]\n",
        );
        text.push_str(&SECTION_BODY.join("\n"));
        text.push_str(
            "\n\n[Sec_2]\n\
             Name[en]=\"Drill\"\n\
             Device=\"EXCELLON\"\n\
             Output=\"%N.drd\"\n\
             Flags=\"0 0 0 1 0 1 1\"\n\
             Emulate=\"0\"\n\
             Offset=\"0.0mil 0.0mil\"\n\
             Layers=\" 44 45\"\n",
        );
        text
    }

    // ==================== parse_section tests ====================

    #[test]
    fn test_parse_section_fields() {
        let section = parse_section("Sec_1", SECTION_BODY).expect("Should parse section");
        assert_eq!(section.tag, "Sec_1");
        assert_eq!(section.display_name(), "Component side");
        assert_eq!(section.device.text(), "GERBER_RS274X");
        assert_eq!(section.output.text(), "%N.cmp");
        assert_eq!(section.flags.text(), "0 0 0 1 0 1 1");
        assert_eq!(section.wheel_template(), Some(".whl"));
        assert_eq!(section.layer_tokens(), vec!["1", "17", "18"]);
        assert_eq!(section.scale, Some(CamValue::from("1")));
        assert!(section.prompt.as_ref().is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn test_parse_section_any_key_order() {
        let lines = [
            "Layers=\" 20\"",
            "Offset=\"0.0mil 0.0mil\"",
            "Emulate=\"0\"",
            "Flags=\"0 0 0 1 0 1 1\"",
            "Output=\"%N.dim\"",
            "Device=\"GERBER_RS274X\"",
        ];
        let section = parse_section("Sec_9", &lines).expect("Should parse section");
        assert_eq!(section.output.text(), "%N.dim");
        assert_eq!(section.name, None);
    }

    #[test]
    fn test_parse_section_missing_device() {
        let lines: Vec<&str> = SECTION_BODY
            .iter()
            .copied()
            .filter(|l| !l.starts_with("Device"))
            .collect();
        let err = parse_section("Sec_1", &lines).unwrap_err();
        assert!(matches!(
            err,
            CamError::MissingField { ref field, .. } if field == "Device"
        ));
    }

    #[test]
    fn test_parse_section_empty_output_is_missing() {
        let lines: Vec<&str> = SECTION_BODY
            .iter()
            .copied()
            .map(|l| if l.starts_with("Output") { "Output=\"\"" } else { l })
            .collect();
        let err = parse_section("Sec_1", &lines).unwrap_err();
        assert!(matches!(
            err,
            CamError::MissingField { ref field, .. } if field == "Output"
        ));
    }

    // ==================== CamParser tests ====================

    #[test]
    fn test_parse_job() {
        let job = CamParser::new(&two_section_job())
            .parse()
            .expect("Should parse job");
        assert_eq!(job.declared, vec!["Sec_1", "Sec_2"]);
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.sections[1].device.text(), "EXCELLON");
        assert_eq!(
            job.description.as_ref().map(|d| d.text()),
            Some("<b>Two layer job</b>")
        );
    }

    #[test]
    fn test_parse_job_crlf_and_bom() {
        let text = format!("\u{feff}{}", two_section_job().replace('\n', "\r\n"));
        let job = CamParser::new(&text).parse().expect("Should parse job");
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.sections[0].layers.text(), " 1 17 18");
    }

    #[test]
    fn test_not_a_cam_job() {
        let err = CamParser::new("[Something Else]\nSection=Sec_1\n")
            .parse()
            .unwrap_err();
        assert!(matches!(err, CamError::NotACamJob { ref found } if found == "[Something Else]"));
    }

    #[test]
    fn test_content_before_header_is_rejected() {
        let err = CamParser::new("garbage\n[CAM Processor Job]\nSection=Sec_1\n")
            .parse()
            .unwrap_err();
        assert!(matches!(err, CamError::NotACamJob { .. }));
    }

    #[test]
    fn test_no_sections_declared() {
        let err = CamParser::new("[CAM Processor Job]\nDescription[en]=\"x\"\n")
            .parse()
            .unwrap_err();
        assert!(matches!(err, CamError::NoSections));
    }

    #[test]
    fn test_undeclared_section() {
        let text = two_section_job().replace("Section=Sec_2\n", "");
        let err = CamParser::new(&text).parse().unwrap_err();
        assert!(matches!(
            err,
            CamError::UndeclaredSection { ref section, .. } if section == "Sec_2"
        ));
    }

    #[test]
    fn test_declared_but_absent_section() {
        let text = two_section_job().replace("Section=Sec_2\n", "Section=Sec_2\nSection=Sec_3\n");
        let job = CamParser::new(&text).parse().expect("Should parse job");
        assert_eq!(job.missing_sections(), vec!["Sec_3"]);
    }
}
