//! Contact form intake and the message inbox.
//!
//! Submissions are all-or-nothing: either every field is present after
//! trimming and exactly one message is stored, or nothing is written.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::admin::{EntityKind, ListFilter, Listable};
use crate::domain::ports::{
    ContactIntakeCommand, MessageRepository, MessageRepositoryError, MessagesQuery,
};

/// Field names of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// Rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// One or more fields were missing or blank.
    #[error("all fields are required")]
    AllFieldsRequired { missing: Vec<ContactField> },
}

/// Raw contact form input. Missing form fields deserialise as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ContactSubmissionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Trimmed, non-empty submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    name: String,
    email: String,
    message: String,
}

impl TryFrom<ContactSubmissionRequest> for ValidatedSubmission {
    type Error = ContactValidationError;

    fn try_from(request: ContactSubmissionRequest) -> Result<Self, Self::Error> {
        let name = request.name.trim();
        let email = request.email.trim();
        let message = request.message.trim();
        let missing: Vec<ContactField> = [
            (ContactField::Name, name),
            (ContactField::Email, email),
            (ContactField::Message, message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ContactValidationError::AllFieldsRequired { missing });
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }
}

/// A stored visitor message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created: DateTime<Utc>,
}

impl Listable for Message {
    fn active_flag(&self) -> Option<bool> {
        None
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "message" => Some(&self.message),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for Error {
    fn from(error: ContactValidationError) -> Self {
        match &error {
            ContactValidationError::AllFieldsRequired { missing } => {
                Error::invalid_request(error.to_string()).with_details(json!({
                    "code": "all_fields_required",
                    "fields": missing,
                }))
            }
        }
    }
}

fn map_repository_error(error: MessageRepositoryError) -> Error {
    match error {
        MessageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("message store unavailable: {message}"))
        }
        MessageRepositoryError::Query { message } => {
            Error::internal(format!("message store error: {message}"))
        }
    }
}

#[derive(Clone)]
pub struct ContactIntakeService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactIntakeService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ContactIntakeService<R>
where
    R: MessageRepository,
{
    /// Validate and store a submission.
    pub async fn submit(&self, request: ContactSubmissionRequest) -> Result<Message, Error> {
        let valid = ValidatedSubmission::try_from(request)?;
        let message = Message {
            id: Uuid::new_v4(),
            name: valid.name,
            email: valid.email,
            message: valid.message,
            created: self.clock.utc(),
        };
        self.repo
            .append(&message)
            .await
            .map_err(map_repository_error)?;
        info!(id = %message.id, "contact message stored");
        Ok(message)
    }
}

#[async_trait]
impl<R> ContactIntakeCommand for ContactIntakeService<R>
where
    R: MessageRepository,
{
    async fn submit(&self, request: ContactSubmissionRequest) -> Result<Message, Error> {
        ContactIntakeService::submit(self, request).await
    }
}

#[async_trait]
impl<R> MessagesQuery for ContactIntakeService<R>
where
    R: MessageRepository,
{
    async fn list_messages(&self, filter: &ListFilter) -> Result<Vec<Message>, Error> {
        filter
            .supported_by(EntityKind::Message)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let messages = self.repo.list().await.map_err(map_repository_error)?;
        Ok(filter.apply(EntityKind::Message, messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockMessageRepository;
    use crate::domain::test_support::{fixture_clock, fixture_timestamp};
    use rstest::rstest;

    fn request(name: &str, email: &str, message: &str) -> ContactSubmissionRequest {
        ContactSubmissionRequest {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn stores_one_trimmed_message() {
        let mut repo = MockMessageRepository::new();
        repo.expect_append()
            .withf(|m| m.name == "Ana" && m.email == "ana@example.com" && m.message == "Olá")
            .times(1)
            .return_once(|_| Ok(()));
        let service = ContactIntakeService::new(Arc::new(repo), fixture_clock());

        let stored = service
            .submit(request(" Ana ", "ana@example.com", "Olá\n"))
            .await
            .expect("stored");
        assert_eq!(stored.created, fixture_timestamp());
        assert_eq!(stored.name, "Ana");
    }

    #[rstest]
    #[case(request("", "ana@example.com", "Olá"), vec![ContactField::Name])]
    #[case(request("Ana", "  ", "Olá"), vec![ContactField::Email])]
    #[case(
        request("", "", ""),
        vec![ContactField::Name, ContactField::Email, ContactField::Message]
    )]
    #[tokio::test]
    async fn blank_fields_write_nothing(
        #[case] input: ContactSubmissionRequest,
        #[case] missing: Vec<ContactField>,
    ) {
        let mut repo = MockMessageRepository::new();
        repo.expect_append().never();
        let service = ContactIntakeService::new(Arc::new(repo), fixture_clock());

        let err = service.submit(input).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "all fields are required");
        let details = err.details().expect("details");
        assert_eq!(details["code"], "all_fields_required");
        assert_eq!(details["fields"], serde_json::to_value(&missing).expect("json"));
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_is_service_unavailable() {
        let mut repo = MockMessageRepository::new();
        repo.expect_append()
            .times(1)
            .return_once(|_| Err(MessageRepositoryError::connection("pool timed out")));
        let service = ContactIntakeService::new(Arc::new(repo), fixture_clock());

        let err = service
            .submit(request("Ana", "ana@example.com", "Olá"))
            .await
            .expect_err("store down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn inbox_search_matches_email() {
        let messages = vec![
            Message {
                id: Uuid::new_v4(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                message: "Olá".into(),
                created: fixture_timestamp(),
            },
            Message {
                id: Uuid::new_v4(),
                name: "Bruno".into(),
                email: "bruno@example.org".into(),
                message: "Oi".into(),
                created: fixture_timestamp(),
            },
        ];
        let mut repo = MockMessageRepository::new();
        repo.expect_list().times(1).return_once(move || Ok(messages));
        let service = ContactIntakeService::new(Arc::new(repo), fixture_clock());

        let filter = ListFilter {
            search: Some("EXAMPLE.ORG".into()),
            ..ListFilter::default()
        };
        let found = service.list_messages(&filter).await.expect("listed");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bruno");
    }
}
