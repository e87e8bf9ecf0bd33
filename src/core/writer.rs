use crate::core::formatter::compose_person_info;
use crate::domain::model::{OutputFormat, PersonResult};
use crate::utils::error::{Result, ScraperError};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flat CSV row; `errors` is joined since CSV cells cannot hold lists.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    found: bool,
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
    age: Option<u32>,
    first_paragraph: Option<&'a str>,
    errors: String,
}

impl<'a> From<&'a PersonResult> for CsvRow<'a> {
    fn from(record: &'a PersonResult) -> Self {
        Self {
            name: &record.name,
            found: record.found,
            birth_date: record.birth_date,
            death_date: record.death_date,
            age: record.age,
            first_paragraph: record.first_paragraph.as_deref(),
            errors: record.errors.join("; "),
        }
    }
}

/// Gives `path` the extension of `format`. Only another output format's
/// extension is replaced; any other dotted suffix stays part of the name.
pub fn with_format_extension(path: &Path, format: OutputFormat) -> PathBuf {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(OutputFormat::from_extension)
    {
        Some(current) if current == format => path.to_path_buf(),
        Some(_) => path.with_extension(format.extension()),
        None => {
            let mut appended = path.as_os_str().to_os_string();
            appended.push(".");
            appended.push(format.extension());
            PathBuf::from(appended)
        }
    }
}

/// First of `name.ext`, `name_1.ext`, `name_2.ext`, ... that does not exist yet.
pub fn next_free_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    let mut counter = 1;
    loop {
        let candidate = parent.join(format!("{}_{}{}", stem, counter, ext));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

pub struct OutputWriter {
    today: NaiveDate,
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter {
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Fixes the date used for "Still Alive as of ..." lines.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn compose(&self, record: &PersonResult) -> String {
        compose_person_info(record, self.today)
    }

    /// Serializes `records` in `format`.
    pub fn render(&self, records: &[PersonResult], format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Csv => {
                if records.is_empty() {
                    return Err(ScraperError::EmptyOutput {
                        message: "CSV output needs at least one record for its header".to_string(),
                    });
                }
                let mut writer = csv::Writer::from_writer(Vec::new());
                for record in records {
                    writer.serialize(CsvRow::from(record))?;
                }
                writer
                    .into_inner()
                    .map_err(|e| ScraperError::IoError(e.into_error()))
            }
            OutputFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
            OutputFormat::Txt => Ok(records
                .iter()
                .map(|record| self.compose(record))
                .collect::<Vec<_>>()
                .join("\n")
                .into_bytes()),
        }
    }

    /// Prints every record unless `silent`, then writes the file when a path
    /// is given. Returns the path actually written.
    pub fn write<W: Write>(
        &self,
        console: &mut W,
        records: &[PersonResult],
        format: OutputFormat,
        path: Option<&Path>,
        silent: bool,
    ) -> Result<Option<PathBuf>> {
        if !silent {
            for record in records {
                writeln!(console, "{}", self.compose(record))?;
            }
        }

        let Some(path) = path else {
            return Ok(None);
        };

        let data = self.render(records, format)?;
        let target = next_free_path(&with_format_extension(path, format));

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), target.display());
        fs::write(&target, data)?;
        tracing::info!("📁 Results saved to: {}", target.display());

        Ok(Some(target))
    }
}
