use url::Url;

use crate::models::CoursePayload;

const LINK_MAX_LENGTH: usize = 1000;
const TEXT_MAX_LENGTH: usize = 2000;

/// Runs every applicable check and joins the collected violations into one
/// message, so a single response tells the client everything that is wrong
/// with the payload.
pub fn validate(course: &CoursePayload) -> Result<(), String> {
    let mut violations: Vec<String> = Vec::new();

    if is_blank(course.title.as_deref()) {
        violations.push("title must not be blank".to_string());
    }
    if is_blank(course.trainer.as_deref()) {
        violations.push("trainer must not be blank".to_string());
    }
    if course.course_type.is_none() {
        violations.push("courseType must not be null".to_string());
    }
    if let (Some(start), Some(end)) = (course.start_date, course.end_date) {
        if start >= end {
            violations
                .push("The start date must not be equal or before the end date".to_string());
        }
    }
    if let Some(link) = course.link.as_deref() {
        match Url::parse(link) {
            Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
                violations.push(r#"link protocol must be "http" or "https""#.to_string());
            }
            Ok(_) => {}
            Err(_) => violations.push("link must be a valid URL".to_string()),
        }
        if link.chars().count() > LINK_MAX_LENGTH {
            violations.push("link length must be between 0 and 1000".to_string());
        }
    }
    if exceeds_max_length(course.target_audience.as_deref(), TEXT_MAX_LENGTH) {
        violations.push("targetAudience length must be between 0 and 2000".to_string());
    }
    if exceeds_max_length(course.description.as_deref(), TEXT_MAX_LENGTH) {
        violations.push("description length must be between 0 and 2000".to_string());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join(", "))
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

fn exceeds_max_length(value: Option<&str>, max: usize) -> bool {
    value.map_or(false, |text| text.chars().count() > max)
}
