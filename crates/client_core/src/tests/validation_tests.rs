use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("date")
}

#[test]
fn organization_names_require_quoted_title() {
    for prefix in ORG_PREFIXES {
        let quoted = format!("{prefix} \"Рога и Копыта\"");
        assert!(validate_name(&quoted).is_ok(), "{quoted} should pass");

        let unquoted = format!("{prefix} Рога и Копыта");
        assert!(validate_name(&unquoted).is_err(), "{unquoted} should fail");

        let bare = prefix.to_string();
        assert!(validate_name(&bare).is_err(), "{bare} alone should fail");
    }
}

#[test]
fn organization_names_accept_alternate_quote_glyphs() {
    assert!(validate_name("ООО «Молочная ферма №1»").is_err());
    assert!(validate_name("ООО «Молочная ферма 1»").is_ok());
    assert!(validate_name("ИП “Иванов И.И.”").is_ok());
    assert!(validate_name("АО \"Север-Юг (2000)\"").is_ok());
}

#[test]
fn organization_names_reject_surrounding_whitespace() {
    assert!(validate_name("  АО \"Север-Юг (2000)\"  ").is_err());
    assert!(validate_name("  ИП \"Иванов\"  ").is_err());
    assert!(validate_name("ИП \"Иванов\" ").is_err());
    assert!(validate_name("  Иван  ").is_err());
}

#[test]
fn prefix_must_be_a_whole_token() {
    assert_eq!(organization_prefix("Фёдор"), None);
    assert_eq!(organization_prefix("Ульяна"), None);
    assert_eq!(organization_prefix("ИПАТОВ"), None);
    assert_eq!(organization_prefix("ИП \"Петров\""), Some("ИП"));
    assert_eq!(organization_prefix("ОООП \"Вектор\""), Some("ОООП"));
    assert_eq!(organization_prefix("ООО\"Вектор\""), Some("ООО"));

    assert!(validate_name("Фёдор").is_ok());
    assert!(validate_name("ИПАТОВ").is_ok());
    assert!(validate_name("ОООП \"Вектор\"").is_ok());
    assert!(validate_name("ООО\"Вектор\"").is_err());
}

#[test]
fn personal_names_follow_letter_rules() {
    assert!(validate_name("Иван").is_ok());
    assert!(validate_name("Анна-Мария").is_ok());
    assert!(validate_name("O'Brien").is_ok());
    assert!(validate_name("Иван Петров").is_ok());
    assert!(validate_name("Ян").is_ok());

    assert!(validate_name("Я").is_err());
    assert!(validate_name("").is_err());
    assert!(validate_name("Иван2").is_err());
    assert!(validate_name("Иван  Петров").is_err());
    assert!(validate_name("-Иван").is_err());
}

#[test]
fn personal_name_length_is_bounded_in_characters() {
    let hundred = "Я".repeat(100);
    assert!(validate_name(&hundred).is_ok());

    let too_long = "Я".repeat(101);
    assert_eq!(
        validate_name(&too_long),
        Err(FieldError::new(FieldName::Name, NAME_MESSAGE))
    );
}

#[test]
fn phone_accepts_russian_mobile_formats() {
    assert!(validate_phone("+7 999 999 99 99").is_ok());
    assert!(validate_phone("89999999999").is_ok());
    assert!(validate_phone("+7-999-999-99-99").is_ok());
    assert!(validate_phone("8 999-9999999").is_ok());

    assert!(validate_phone("1234567890").is_err());
    assert!(validate_phone("+8 999 999 99 99").is_err());
    assert!(validate_phone("+7 999 999 99 9").is_err());
    assert!(validate_phone("+7  999 999 99 99").is_err());
}

#[test]
fn date_must_not_be_in_the_past() {
    assert!(validate_date("2026-10-18", today()).is_ok());
    assert!(validate_date("2026-12-01", today()).is_ok());

    assert!(validate_date("2026-10-17", today()).is_err());
    assert!(validate_date("", today()).is_err());
    assert!(validate_date("18.10.2026", today()).is_err());
    assert!(validate_date("2026-02-30", today()).is_err());
}

#[test]
fn quantity_rejects_zero_and_leading_zeros() {
    assert!(validate_quantity("1").is_ok());
    assert!(validate_quantity("50").is_ok());

    assert!(validate_quantity("0").is_err());
    assert!(validate_quantity("007").is_err());
    assert!(validate_quantity("").is_err());
    assert!(validate_quantity("-5").is_err());
}

#[test]
fn normalize_quantity_strips_noise_and_leading_zeros() {
    assert_eq!(normalize_quantity("007"), "7");
    assert_eq!(normalize_quantity("0"), "");
    assert_eq!(normalize_quantity("1 2a"), "12");
    assert_eq!(normalize_quantity("50 кг"), "50");
    assert!(validate_quantity(&normalize_quantity("007")).is_ok());
}

#[test]
fn address_needs_five_allowed_characters() {
    assert!(validate_address("ул. Ленина, д. 5").is_ok());
    assert!(validate_address("  Казань  ").is_ok());
    assert!(validate_address("Москва, \"Сити\" (башня 2)/4").is_ok());

    assert!(validate_address("ул.1").is_err());
    assert!(validate_address("     ").is_err());
    assert!(validate_address("ул. Ленина #5").is_err());
}

fn complete_record(quantity: &str, address: Option<&str>) -> FormRecord {
    FormRecord {
        name: "ООО \"Рога и Копыта\"".into(),
        tel: "+7 999 999 99 99".into(),
        quantity: quantity.into(),
        date: "2026-10-20".into(),
        origin: "Сайт".into(),
        date_of_dispatch: "2026-10-18 09:30:00".into(),
        address: address.map(str::to_string),
    }
}

#[test]
fn record_below_threshold_ignores_address() {
    let record = complete_record("49", None);
    assert!(validate_record(&record, today(), 50).is_empty());

    let with_junk = complete_record("49", Some("#"));
    assert!(validate_record(&with_junk, today(), 50).is_empty());
}

#[test]
fn record_at_threshold_requires_address() {
    let missing = complete_record("50", None);
    let errors = validate_record(&missing, today(), 50);
    assert_eq!(errors.get(FieldName::Address), Some(ADDRESS_REQUIRED_MESSAGE));
    assert_eq!(errors.len(), 1);

    let short = complete_record("50", Some("ул."));
    let errors = validate_record(&short, today(), 50);
    assert_eq!(errors.get(FieldName::Address), Some(ADDRESS_MESSAGE));

    let ok = complete_record("50", Some("ул. Ленина, 1"));
    assert!(validate_record(&ok, today(), 50).is_empty());
}

#[test]
fn blank_record_reports_every_required_field() {
    let record = FormRecord::blank("Сайт", "2026-10-18 09:30:00");
    let errors = validate_record(&record, today(), 50);

    assert_eq!(errors.get(FieldName::Name), Some(NAME_MESSAGE));
    assert_eq!(errors.get(FieldName::Tel), Some(TEL_MESSAGE));
    assert_eq!(errors.get(FieldName::Date), Some(DATE_MESSAGE));
    assert_eq!(errors.get(FieldName::Quantity), Some(QUANTITY_SUBMIT_MESSAGE));
    assert!(!errors.contains(FieldName::Address));
}
