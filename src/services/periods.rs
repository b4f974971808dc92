use crate::errors::AppError;
use crate::models::PeriodType;

/// Generate `count` future period labels following `last`, advancing
/// according to the granularity.
///
/// Week labels run `YYYY-WW` over a simplified 52-week year: the label after
/// `2024-52` is `2025-01`, with no ISO 53-week exception. Month labels roll
/// past 12 the same way; year labels are plain integers.
pub fn future_labels(
    period: PeriodType,
    last: &str,
    count: usize,
) -> Result<Vec<String>, AppError> {
    let mut labels = Vec::with_capacity(count);

    match period {
        PeriodType::Year => {
            let mut year: i32 = last.trim().parse().map_err(|e| {
                AppError::Validation(format!("invalid year label '{}': {}", last, e))
            })?;
            for _ in 0..count {
                year += 1;
                labels.push(year.to_string());
            }
        }
        PeriodType::Month => {
            let (mut year, mut month) = split_label(last)?;
            for _ in 0..count {
                month += 1;
                if month > 12 {
                    year += 1;
                    month = 1;
                }
                labels.push(format!("{:04}-{:02}", year, month));
            }
        }
        PeriodType::Week => {
            let (mut year, mut week) = split_label(last)?;
            for _ in 0..count {
                week += 1;
                if week > 52 {
                    year += 1;
                    week = 1;
                }
                labels.push(format!("{:04}-{:02}", year, week));
            }
        }
    }

    Ok(labels)
}

fn split_label(label: &str) -> Result<(i32, u32), AppError> {
    let (year, sub) = label
        .split_once('-')
        .ok_or_else(|| AppError::Validation(format!("malformed period label '{}'", label)))?;

    let year = year
        .parse()
        .map_err(|e| AppError::Validation(format!("invalid period label '{}': {}", label, e)))?;
    let sub = sub
        .parse()
        .map_err(|e| AppError::Validation(format!("invalid period label '{}': {}", label, e)))?;

    Ok((year, sub))
}
