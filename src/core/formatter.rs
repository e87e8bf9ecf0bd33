use crate::domain::model::PersonResult;
use crate::utils::text::title_case;
use chrono::NaiveDate;

pub const INFO_NOT_FOUND: &str = "Information not found";

fn long_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Human readable block for one person, ending with a blank line.
pub fn compose_person_info(record: &PersonResult, today: NaiveDate) -> String {
    let birth_line = match record.birth_date {
        Some(date) => format!("Birth date: {}", long_date(date)),
        None => format!("Birth date: {}", INFO_NOT_FOUND),
    };

    let death_line = match (record.birth_date, record.death_date) {
        (_, Some(date)) => format!("Death date: {}", long_date(date)),
        (Some(_), None) => format!("Still Alive as of {}", today.format("%B %Y")),
        (None, None) => format!("Death date: {}", INFO_NOT_FOUND),
    };

    let age_line = match record.age {
        Some(age) => format!("Age: {}", age),
        None => format!("Age: {}", INFO_NOT_FOUND),
    };

    let paragraph_line = format!(
        "First Paragraph: {}",
        record.first_paragraph.as_deref().unwrap_or(INFO_NOT_FOUND)
    );

    [
        title_case(&record.name),
        birth_line,
        death_line,
        age_line,
        paragraph_line,
        "\n".to_string(),
    ]
    .join("\n")
}
