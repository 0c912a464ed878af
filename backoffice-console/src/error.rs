use axum::http::StatusCode;
use service_core::error::AppError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::financials::MetricError;
use crate::services::SourceError;

/// Failures of a console action. None of them clears state that was already
/// displayed.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Source(SourceError),

    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error("A save is already in progress")]
    Busy,

    #[error("{0} not loaded yet")]
    NotLoaded(&'static str),
}

impl From<ValidationErrors> for ConsoleError {
    fn from(errors: ValidationErrors) -> Self {
        ConsoleError::Validation(errors)
    }
}

impl From<SourceError> for ConsoleError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Validation(errors) => ConsoleError::Validation(errors),
            other => ConsoleError::Source(other),
        }
    }
}

impl ConsoleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Validation(_) | ConsoleError::Metric(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ConsoleError::Source(_) => StatusCode::BAD_GATEWAY,
            ConsoleError::Busy | ConsoleError::NotLoaded(_) => StatusCode::CONFLICT,
        }
    }

    /// Text shown to the operator under the action's headline.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Validation(errors) => validation_messages(errors).join(" "),
            ConsoleError::Source(SourceError::Network { .. }) => {
                "Δεν ήταν δυνατή η σύνδεση με τον διακομιστή.".to_string()
            }
            ConsoleError::Source(SourceError::Server { status, .. }) => {
                format!("Ο διακομιστής απάντησε με σφάλμα ({status}).")
            }
            ConsoleError::Source(SourceError::Decode { .. }) => {
                "Μη αναμενόμενη απάντηση από τον διακομιστή.".to_string()
            }
            ConsoleError::Source(SourceError::Validation(errors)) => {
                validation_messages(errors).join(" ")
            }
            ConsoleError::Metric(_) => {
                "Παρακαλώ εισάγετε και αποθηκεύστε τα τετραγωνικά μέτρα πρώτα.".to_string()
            }
            ConsoleError::Busy => "Η αποθήκευση βρίσκεται ήδη σε εξέλιξη.".to_string(),
            ConsoleError::NotLoaded(_) => {
                "Τα δεδομένα δεν έχουν φορτωθεί ακόμη. Δοκιμάστε ξανά.".to_string()
            }
        }
    }
}

/// One message per invalid field, falling back to the field name when the
/// validator carries no message.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Μη έγκυρη τιμή στο πεδίο {field}."),
            })
        })
        .collect()
}

impl From<ConsoleError> for AppError {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::Validation(errors) => AppError::ValidationError(errors),
            ConsoleError::Source(source) => AppError::BadGateway(source.to_string()),
            ConsoleError::Metric(metric) => AppError::BadRequest(metric.into()),
            ConsoleError::Busy | ConsoleError::NotLoaded(_) => {
                AppError::Conflict(anyhow::anyhow!(err.to_string()))
            }
        }
    }
}
