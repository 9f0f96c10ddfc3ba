use crate::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake from a String
///
/// # Arguments
/// - `value` - The string to attempt to parse into a non-zero `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed the snowflake
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse the string as a u64
/// - `Err(AppError::InternalErr(ZeroId))` - The string parsed to zero
pub fn parse_snowflake(value: &str) -> Result<u64, AppError> {
    let result = value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    if result == 0 {
        return Err(InternalError::ZeroId.into());
    }

    Ok(result)
}

/// Extracts the first role id from a `<@&id>` mention inside `text`.
///
/// # Returns
/// - `Some(u64)` - Id of the first well-formed, non-zero role mention
/// - `None` - No role mention present
pub fn find_role_mention(text: &str) -> Option<u64> {
    let mut rest = text;
    while let Some(start) = rest.find("<@&") {
        let after = &rest[start + 3..];
        let digits: &str = match after.find('>') {
            Some(end) => &after[..end],
            None => return None,
        };

        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = digits.parse::<u64>() {
                if id != 0 {
                    return Some(id);
                }
            }
        }

        rest = after;
    }

    None
}
