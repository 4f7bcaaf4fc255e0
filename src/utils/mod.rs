//! # Utilities Module
//!
//! Utility functions for text formatting, game math, and enemy navigation.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;

/// Formats a money amount with a dollar sign and thousands separators.
///
/// # Examples
///
/// ```
/// use gigshift::utils::format_money;
///
/// assert_eq!(format_money(0), "$0");
/// assert_eq!(format_money(1234567), "$1,234,567");
/// assert_eq!(format_money(-500), "-$500");
/// ```
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Substitutes `{placeholder}` markers in a message template.
///
/// Unknown placeholders are left untouched so a malformed template still
/// produces readable output.
///
/// # Examples
///
/// ```
/// use gigshift::utils::format_message;
///
/// let msg = format_message("You hit the {enemy} for {damage}!", &[
///     ("enemy", "Angry Customer".to_string()),
///     ("damage", "7".to_string()),
/// ]);
/// assert_eq!(msg, "You hit the Angry Customer for 7!");
/// ```
pub fn format_message(template: &str, values: &[(&str, String)]) -> String {
    let mut message = template.to_string();
    for (key, value) in values {
        message = message.replace(&format!("{{{}}}", key), value);
    }
    message
}
