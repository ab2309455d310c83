//! Format - Locale-Aware Formatting
//!
//! Date, currency and number formatting for the `en-US` and `es-PA` locales.
//! Panama groups digits the same way as the US (`1,234.56`).

use chrono::{Datelike, NaiveDate};

use super::Language;

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const ES_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

/// Date presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// Numeric month/day/year
    #[default]
    Short,
    /// Month spelled out
    Long,
}

/// Fraction digit bounds for number formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOptions {
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
        }
    }
}

impl NumberOptions {
    /// Fixed number of fraction digits
    pub fn fixed(digits: usize) -> Self {
        Self {
            min_fraction_digits: digits,
            max_fraction_digits: digits,
        }
    }
}

/// Format a calendar date
pub fn format_date(language: Language, date: NaiveDate, style: DateStyle) -> String {
    match (language, style) {
        (Language::En, DateStyle::Short) => {
            format!("{}/{}/{}", date.month(), date.day(), date.year())
        }
        (Language::Es, DateStyle::Short) => {
            format!("{:02}/{:02}/{}", date.month(), date.day(), date.year())
        }
        (Language::En, DateStyle::Long) => format!(
            "{} {}, {}",
            EN_MONTHS[date.month0() as usize],
            date.day(),
            date.year()
        ),
        (Language::Es, DateStyle::Long) => format!(
            "{} de {} de {}",
            date.day(),
            ES_MONTHS[date.month0() as usize],
            date.year()
        ),
    }
}

/// Format a number with grouping and bounded fraction digits
pub fn format_number(_language: Language, value: f64, options: &NumberOptions) -> String {
    let max = options.max_fraction_digits.max(options.min_fraction_digits);
    let fixed = format!("{:.*}", max, value.abs());

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (fixed.clone(), String::new()),
    };

    let mut frac = frac_part;
    while frac.len() > options.min_fraction_digits && frac.ends_with('0') {
        frac.pop();
    }

    let mut result = String::new();
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.push('-');
    }
    result.push_str(&group_thousands(&int_part));
    if !frac.is_empty() {
        result.push('.');
        result.push_str(&frac);
    }
    result
}

/// Format a monetary amount
///
/// USD uses `$` in `en-US` and the ISO code in `es-PA`; other currencies
/// always use the ISO code.
pub fn format_currency(language: Language, amount: f64, currency: &str) -> String {
    let digits = format_number(language, amount.abs(), &NumberOptions::fixed(2));
    let sign = if amount < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    let currency = currency.to_ascii_uppercase();

    match (language, currency.as_str()) {
        (Language::En, "USD") => format!("{sign}${digits}"),
        _ => format!("{sign}{currency}\u{a0}{digits}"),
    }
}

/// Insert `,` every three digits from the right
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
