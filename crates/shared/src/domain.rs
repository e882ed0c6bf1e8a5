use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownField;

pub const DEFAULT_ORIGIN: &str = "Сайт";
pub const DEFAULT_ADDRESS_THRESHOLD: u64 = 50;
pub const DISPATCH_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User-editable fields of the order form, in the order errors are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Tel,
    Date,
    Quantity,
    Address,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::Name,
        FieldName::Tel,
        FieldName::Date,
        FieldName::Quantity,
        FieldName::Address,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Tel => "tel",
            FieldName::Date => "date",
            FieldName::Quantity => "quantity",
            FieldName::Address => "address",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(FieldName::Name),
            "tel" => Ok(FieldName::Tel),
            "date" => Ok(FieldName::Date),
            "quantity" => Ok(FieldName::Quantity),
            "address" => Ok(FieldName::Address),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// The order as it is posted to the submission endpoint.
///
/// `address` is `None` whenever the quantity is below the delivery threshold,
/// which keeps it out of both validation and the encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub name: String,
    pub tel: String,
    pub quantity: String,
    pub date: String,
    pub origin: String,
    #[serde(rename = "dateOfDispatch")]
    pub date_of_dispatch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl FormRecord {
    pub fn blank(origin: impl Into<String>, date_of_dispatch: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            tel: String::new(),
            quantity: String::new(),
            date: String::new(),
            origin: origin.into(),
            date_of_dispatch: date_of_dispatch.into(),
            address: None,
        }
    }

    pub fn field(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Tel => &self.tel,
            FieldName::Date => &self.date,
            FieldName::Quantity => &self.quantity,
            FieldName::Address => self.address.as_deref().unwrap_or_default(),
        }
    }

    /// Numeric quantity; digit strings too long for `u64` saturate.
    pub fn quantity_value(&self) -> Option<u64> {
        parse_quantity(&self.quantity)
    }

    pub fn requires_address(&self, threshold: u64) -> bool {
        self.quantity_value()
            .is_some_and(|quantity| quantity >= threshold)
    }
}

pub fn parse_quantity(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(raw.parse::<u64>().unwrap_or(u64::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    SuccessPickup,
    Error,
}

impl SubmissionStatus {
    pub fn is_sending(self) -> bool {
        self == SubmissionStatus::Sending
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            SubmissionStatus::Success | SubmissionStatus::SuccessPickup
        )
    }

    /// Text shown to the customer once a submission has finished.
    pub fn message(self) -> Option<&'static str> {
        match self {
            SubmissionStatus::Idle | SubmissionStatus::Sending => None,
            SubmissionStatus::Success => Some("Заявка успешно отправлена!"),
            SubmissionStatus::SuccessPickup => Some(
                "Заявка успешно отправлена! Будем ожидать вас на ферме в д.Малый Сулабаш.",
            ),
            SubmissionStatus::Error => Some("Ошибка отправки заявки."),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::SuccessPickup => "success-pickup",
            SubmissionStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Field name to message. A missing key means the field currently passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_endpoint_field_names() {
        let mut record = FormRecord::blank(DEFAULT_ORIGIN, "2026-10-18 09:30:00");
        record.quantity = "60".into();
        record.address = Some("ул. Ленина, 1".into());

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["dateOfDispatch"], "2026-10-18 09:30:00");
        assert_eq!(json["origin"], "Сайт");
        assert_eq!(json["address"], "ул. Ленина, 1");
    }

    #[test]
    fn record_without_address_omits_the_key() {
        let record = FormRecord::blank(DEFAULT_ORIGIN, "2026-10-18 09:30:00");
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("address").is_none());
    }

    #[test]
    fn quantity_value_handles_empty_and_oversized_input() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("12a"), None);
        assert_eq!(parse_quantity("49"), Some(49));
        assert_eq!(parse_quantity("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn requires_address_only_at_or_above_threshold() {
        let mut record = FormRecord::blank(DEFAULT_ORIGIN, "");
        record.quantity = "49".into();
        assert!(!record.requires_address(DEFAULT_ADDRESS_THRESHOLD));
        record.quantity = "50".into();
        assert!(record.requires_address(DEFAULT_ADDRESS_THRESHOLD));
    }

    #[test]
    fn field_names_round_trip_through_strings() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().expect("parse"), field);
        }
        assert!("phone".parse::<FieldName>().is_err());
        assert!("origin".parse::<FieldName>().is_err());
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&SubmissionStatus::SuccessPickup).expect("serialize");
        assert_eq!(json, "\"success-pickup\"");
        assert_eq!(SubmissionStatus::SuccessPickup.to_string(), "success-pickup");
    }

    #[test]
    fn validation_errors_iterate_in_display_order() {
        let mut errors = ValidationErrors::new();
        errors.insert(FieldName::Address, "a");
        errors.insert(FieldName::Name, "n");
        errors.insert(FieldName::Date, "d");

        let order: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(order, vec![FieldName::Name, FieldName::Date, FieldName::Address]);

        assert_eq!(errors.remove(FieldName::Date).as_deref(), Some("d"));
        assert!(!errors.contains(FieldName::Date));
        assert_eq!(errors.len(), 2);
    }
}
