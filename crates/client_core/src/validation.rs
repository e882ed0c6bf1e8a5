//! Field rules for the order form.
//!
//! Every function here is pure: it looks only at its input (and, for the
//! delivery date, the caller-supplied "today") and never touches form state.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{
    domain::{FieldName, FormRecord, ValidationErrors},
    error::FieldError,
};

pub const NAME_MESSAGE: &str =
    "Введите корректное имя или название организации в формате: ООО \"Название\" или ИП \"ФИО\"";
pub const TEL_MESSAGE: &str = "Введите корректный номер телефона, например: +7 999 999 99 99";
pub const DATE_MESSAGE: &str = "Дата доставки не может быть меньше сегодняшней";
pub const QUANTITY_MESSAGE: &str = "Введите положительное число без нуля в начале";
pub const QUANTITY_SUBMIT_MESSAGE: &str = "Количество должно быть положительным числом";
pub const ADDRESS_MESSAGE: &str = "Введите корректный адрес (минимум 5 символов)";
pub const ADDRESS_REQUIRED_MESSAGE: &str = "Введите адрес доставки";

const PERSON_NAME_MIN_CHARS: usize = 2;
const PERSON_NAME_MAX_CHARS: usize = 100;

/// Legal-form abbreviations that switch the name field into organization mode.
pub const ORG_PREFIXES: &[&str] = &[
    "ООО", "АО", "ПАО", "НПАО", "ЗАО", "ОАО", "ОООП", "ПК", "ГУП", "МУП", "ХП", "КФХ", "НП", "НКО",
    "АНО", "ТСЖ", "СНТ", "ОПО", "Ф", "У", "ИП", "ПТ", "ПИФ", "ИТ",
];

static ORG_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    let prefixes = ORG_PREFIXES.join("|");
    Regex::new(&format!(
        r#"^({prefixes})\s+["“”«»][A-Za-zА-Яа-яЁё0-9\s.,'()-]+["”«»]$"#
    ))
    .expect("organization name pattern")
});

static PERSON_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zА-Яа-яЁё]+(?:[\s'-][A-Za-zА-Яа-яЁё]+)*$").expect("person name pattern")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+7|8)([\s-]?[0-9]{3}){2}[\s-]?[0-9]{2}[\s-]?[0-9]{2}$").expect("phone pattern")
});

static QUANTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").expect("quantity pattern"));

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[a-zA-Zа-яА-ЯёЁ0-9\s.,/()"'-]{5,}$"#).expect("address pattern")
});

fn is_name_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'А'..='Я' | 'а'..='я' | 'Ё' | 'ё')
}

/// Returns the organization prefix the name opens with, if any.
///
/// The prefix only counts as a whole token: it must end the input or be
/// followed by something other than a letter, so "Фёдор" is a person while
/// "ИП \"Иванов\"" is an organization.
pub fn organization_prefix(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    ORG_PREFIXES.iter().copied().find(|prefix| {
        trimmed
            .strip_prefix(prefix)
            .is_some_and(|rest| match rest.chars().next() {
                None => true,
                Some(next) => next == ' ' || !is_name_letter(next),
            })
    })
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    let valid = if organization_prefix(name).is_some() {
        ORG_NAME_RE.is_match(name)
    } else {
        let chars = name.chars().count();
        PERSON_NAME_RE.is_match(name)
            && (PERSON_NAME_MIN_CHARS..=PERSON_NAME_MAX_CHARS).contains(&chars)
    };

    if valid {
        Ok(())
    } else {
        Err(FieldError::new(FieldName::Name, NAME_MESSAGE))
    }
}

pub fn validate_phone(tel: &str) -> Result<(), FieldError> {
    if PHONE_RE.is_match(tel) {
        Ok(())
    } else {
        Err(FieldError::new(FieldName::Tel, TEL_MESSAGE))
    }
}

/// Accepts an ISO `YYYY-MM-DD` date that is not earlier than `today`.
pub fn validate_date(date: &str, today: NaiveDate) -> Result<(), FieldError> {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(selected) if selected >= today => Ok(()),
        _ => Err(FieldError::new(FieldName::Date, DATE_MESSAGE)),
    }
}

pub fn validate_quantity(quantity: &str) -> Result<(), FieldError> {
    if QUANTITY_RE.is_match(quantity) {
        Ok(())
    } else {
        Err(FieldError::new(FieldName::Quantity, QUANTITY_MESSAGE))
    }
}

pub fn validate_address(address: &str) -> Result<(), FieldError> {
    if ADDRESS_RE.is_match(address.trim()) {
        Ok(())
    } else {
        Err(FieldError::new(FieldName::Address, ADDRESS_MESSAGE))
    }
}

/// Keeps only digits and drops leading zeros, so "0" becomes empty.
pub fn normalize_quantity(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').to_string()
}

/// Checks every field of an outbound record at once.
///
/// Unlike the per-keystroke checks this reports the submit-time wording for
/// quantity and distinguishes a missing address from a malformed one. The
/// address is only examined when the quantity reaches `address_threshold`.
pub fn validate_record(
    record: &FormRecord,
    today: NaiveDate,
    address_threshold: u64,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for result in [
        validate_name(&record.name),
        validate_phone(&record.tel),
        validate_date(&record.date, today),
    ] {
        if let Err(err) = result {
            errors.insert(err.field, err.message);
        }
    }

    if validate_quantity(&record.quantity).is_err() {
        errors.insert(FieldName::Quantity, QUANTITY_SUBMIT_MESSAGE);
    }

    if record.requires_address(address_threshold) {
        let address = record.address.as_deref().unwrap_or_default();
        if address.trim().is_empty() {
            errors.insert(FieldName::Address, ADDRESS_REQUIRED_MESSAGE);
        } else if let Err(err) = validate_address(address) {
            errors.insert(err.field, err.message);
        }
    }

    errors
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
