use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use reqwest::Client;
use shared::{
    domain::{
        FieldName, FormRecord, SubmissionStatus, ValidationErrors, DISPATCH_TIMESTAMP_FORMAT,
    },
    error::FieldError,
    protocol::SubmitResponse,
};
use tracing::{debug, error, info, warn};

pub mod error;
pub mod settings;
pub mod validation;

pub use error::SubmitError;
pub use settings::{load_settings, FormSettings};

use validation::{
    normalize_quantity, validate_address, validate_date, validate_name, validate_phone,
    validate_quantity, validate_record,
};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time, matching what the customer sees on their calendar.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[async_trait]
pub trait SubmissionEndpoint: Send + Sync {
    async fn submit(&self, record: &FormRecord) -> Result<SubmitResponse, SubmitError>;
}

pub struct MissingSubmissionEndpoint;

#[async_trait]
impl SubmissionEndpoint for MissingSubmissionEndpoint {
    async fn submit(&self, _record: &FormRecord) -> Result<SubmitResponse, SubmitError> {
        Err(SubmitError::Unavailable(
            "no submission endpoint configured".to_string(),
        ))
    }
}

/// Posts the record as `application/x-www-form-urlencoded` and reads the
/// JSON verdict back.
pub struct HttpSubmissionEndpoint {
    http: Client,
    url: String,
}

impl HttpSubmissionEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into().trim().to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionEndpoint for HttpSubmissionEndpoint {
    async fn submit(&self, record: &FormRecord) -> Result<SubmitResponse, SubmitError> {
        let response: SubmitResponse = self
            .http
            .post(&self.url)
            .form(record)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

pub struct OrderFormController {
    record: FormRecord,
    errors: ValidationErrors,
    status: SubmissionStatus,
    settings: FormSettings,
    endpoint: Arc<dyn SubmissionEndpoint>,
    clock: Arc<dyn Clock>,
}

impl OrderFormController {
    pub fn new(settings: FormSettings, endpoint: Arc<dyn SubmissionEndpoint>) -> Self {
        Self::new_with_clock(settings, endpoint, Arc::new(SystemClock))
    }

    pub fn new_with_clock(
        settings: FormSettings,
        endpoint: Arc<dyn SubmissionEndpoint>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let record = FormRecord::blank(
            settings.origin.clone(),
            format_dispatch_timestamp(clock.now()),
        );
        Self {
            record,
            errors: ValidationErrors::new(),
            status: SubmissionStatus::Idle,
            settings,
            endpoint,
            clock,
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn endpoint(&self) -> Arc<dyn SubmissionEndpoint> {
        Arc::clone(&self.endpoint)
    }

    pub fn address_required(&self) -> bool {
        self.record.requires_address(self.settings.address_threshold)
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_sending()
    }

    /// Stores a new value for `field` and re-checks only that field.
    ///
    /// Quantity is normalized before it is stored, and toggles whether the
    /// address is part of the form at all.
    pub fn handle_change(&mut self, field: FieldName, value: &str) {
        debug!(field = %field, "order form field changed");
        let result = match field {
            FieldName::Name => {
                self.record.name = value.to_string();
                validate_name(value)
            }
            FieldName::Tel => {
                self.record.tel = value.to_string();
                validate_phone(value)
            }
            FieldName::Date => {
                self.record.date = value.to_string();
                validate_date(value, self.clock.today())
            }
            FieldName::Quantity => {
                let normalized = normalize_quantity(value);
                self.record.quantity = normalized;
                self.sync_address_visibility();
                validate_quantity(&self.record.quantity)
            }
            FieldName::Address => {
                if !self.address_required() {
                    debug!("address ignored while quantity is below the delivery threshold");
                    return;
                }
                self.record.address = Some(value.to_string());
                validate_address(value)
            }
        };
        self.apply_field_result(field, result);
    }

    /// Validates the whole form and, if clean, moves to `Sending` and returns
    /// the record to post. Returns `None` when a submission is already in
    /// flight or a field fails; in the latter case every error is surfaced.
    pub fn begin_submit(&mut self) -> Option<FormRecord> {
        if self.status.is_sending() {
            warn!("order submission already in flight; ignoring resubmit");
            return None;
        }

        let mut record = self.record.clone();
        record.date_of_dispatch = format_dispatch_timestamp(self.clock.now());
        if !record.requires_address(self.settings.address_threshold) {
            record.address = None;
        }

        let errors = validate_record(
            &record,
            self.clock.today(),
            self.settings.address_threshold,
        );
        if !errors.is_empty() {
            warn!(
                invalid_fields = errors.len(),
                "order form failed validation; not sending"
            );
            self.errors = errors;
            return None;
        }

        self.errors = errors;
        self.status = SubmissionStatus::Sending;
        info!(
            quantity = %record.quantity,
            dispatched_at = %record.date_of_dispatch,
            "sending order"
        );
        Some(record)
    }

    /// Applies the endpoint outcome for a record returned by [`begin_submit`].
    ///
    /// [`begin_submit`]: OrderFormController::begin_submit
    pub fn finish_submit(
        &mut self,
        record: &FormRecord,
        outcome: Result<SubmitResponse, SubmitError>,
    ) -> SubmissionStatus {
        if !self.status.is_sending() {
            warn!(status = %self.status, "submission outcome arrived with nothing in flight");
            return self.status;
        }

        self.status = match outcome {
            Ok(response) if response.is_success() => {
                let status = if record.requires_address(self.settings.address_threshold) {
                    SubmissionStatus::Success
                } else {
                    SubmissionStatus::SuccessPickup
                };
                self.reset();
                info!(status = %status, "order accepted");
                status
            }
            Ok(response) => {
                error!(detail = %response.failure_detail(), "order rejected by endpoint");
                SubmissionStatus::Error
            }
            Err(err) => {
                error!("order submission failed: {err}");
                SubmissionStatus::Error
            }
        };
        self.status
    }

    pub async fn submit(&mut self) -> SubmissionStatus {
        let Some(record) = self.begin_submit() else {
            return self.status;
        };
        let endpoint = Arc::clone(&self.endpoint);
        let outcome = endpoint.submit(&record).await;
        self.finish_submit(&record, outcome)
    }

    /// Clears every field and stamps a fresh dispatch time.
    pub fn reset(&mut self) {
        self.record = FormRecord::blank(
            self.settings.origin.clone(),
            format_dispatch_timestamp(self.clock.now()),
        );
        self.errors.clear();
    }

    fn sync_address_visibility(&mut self) {
        if self.address_required() {
            if self.record.address.is_none() {
                self.record.address = Some(String::new());
            }
        } else {
            self.record.address = None;
            self.errors.remove(FieldName::Address);
        }
    }

    fn apply_field_result(&mut self, field: FieldName, result: Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.errors.remove(field);
            }
            Err(err) => self.errors.insert(err.field, err.message),
        }
    }
}

pub fn format_dispatch_timestamp(at: NaiveDateTime) -> String {
    at.format(DISPATCH_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
