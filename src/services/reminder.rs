use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::clients::twilio::TwilioClient;
use crate::db::{CaseWithClient, Store};

/// Seam for the messaging gateway so the dispatcher can be exercised
/// without talking to Twilio.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send one SMS; returns the gateway's message id.
    async fn send_sms(&self, to: &str, body: &str) -> anyhow::Result<String>;
}

#[async_trait]
impl SmsGateway for TwilioClient {
    async fn send_sms(&self, to: &str, body: &str) -> anyhow::Result<String> {
        self.send_message(to, body).await
    }
}

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error(
        "Messaging gateway not configured. Set TWILIO_SID, TWILIO_AUTH_TOKEN and TWILIO_FROM_NUMBER."
    )]
    ConfigurationMissing,

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Outcome of one case's reminder attempt.
#[derive(Debug, Clone)]
pub enum Dispatch {
    Sent {
        case_number: String,
        client_name: String,
        phone_number: String,
        message_id: String,
    },
    SkippedNoPhone {
        case_number: String,
    },
    Failed {
        case_number: String,
        client_name: String,
        error: String,
    },
}

#[derive(Debug, Default)]
pub struct ReminderReport {
    pub target_date: Option<NaiveDate>,
    pub dispatches: Vec<Dispatch>,
}

impl ReminderReport {
    #[must_use]
    pub fn sent(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|d| matches!(d, Dispatch::Sent { .. }))
            .count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|d| matches!(d, Dispatch::SkippedNoPhone { .. }))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|d| matches!(d, Dispatch::Failed { .. }))
            .count()
    }
}

/// Sends hearing reminders for cases due tomorrow. Invoked externally on a
/// schedule; runs to completion serially. Partial failures are tolerated and
/// there is no idempotency key, so a re-run after a crash can send duplicates.
pub struct ReminderService {
    store: Store,
    gateway: Option<Arc<dyn SmsGateway>>,
}

impl ReminderService {
    #[must_use]
    pub fn new(store: Store, gateway: Option<Arc<dyn SmsGateway>>) -> Self {
        Self { store, gateway }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<ReminderReport, ReminderError> {
        let target = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| anyhow::anyhow!("Date overflow computing tomorrow"))?;

        let due = self.store.cases_due_on(target).await?;

        let mut report = ReminderReport {
            target_date: Some(target),
            dispatches: Vec::with_capacity(due.len()),
        };

        if due.is_empty() {
            info!("No hearings found for {}", target);
            return Ok(report);
        }

        // Credentials are checked only once work actually exists, so an
        // unconfigured install with no hearings still exits cleanly.
        let gateway = self
            .gateway
            .as_ref()
            .ok_or(ReminderError::ConfigurationMissing)?;

        info!("{} hearing(s) due on {}", due.len(), target);

        for row in due {
            report.dispatches.push(self.dispatch_one(gateway, row).await);
        }

        Ok(report)
    }

    async fn dispatch_one(&self, gateway: &Arc<dyn SmsGateway>, row: CaseWithClient) -> Dispatch {
        let case_number = row.case.case_number.clone();

        let phone = row
            .client
            .as_ref()
            .and_then(|c| c.phone_number.as_deref())
            .filter(|p| !p.is_empty());

        let Some(phone) = phone else {
            warn!("Skipping case {}: client phone number missing", case_number);
            return Dispatch::SkippedNoPhone { case_number };
        };

        let client_name = row
            .client
            .as_ref()
            .map_or_else(String::new, |c| c.name.clone());

        let body = compose_reminder(&row);

        match gateway.send_sms(phone, &body).await {
            Ok(message_id) => {
                info!(
                    "Sent reminder to {} ({}) for case {}: {}",
                    client_name, phone, case_number, message_id
                );
                Dispatch::Sent {
                    case_number,
                    client_name,
                    phone_number: phone.to_string(),
                    message_id,
                }
            }
            Err(e) => {
                error!("Failed to send reminder to {}: {}", client_name, e);
                Dispatch::Failed {
                    case_number,
                    client_name,
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Reminder body mirrors the notice format practitioners expect:
/// date, case number, title and court.
fn compose_reminder(row: &CaseWithClient) -> String {
    let case = &row.case;
    let date = case
        .next_hearing_date
        .map_or_else(String::new, |d| d.to_string());
    let title = case.case_title.as_deref().unwrap_or("(untitled)");
    let court = case.court_name.as_deref().unwrap_or("(court not recorded)");

    format!(
        "Reminder: You have a hearing tomorrow ({date}) for case {}: {title} at {court}.",
        case.case_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::cases;
    use chrono::NaiveDate;

    fn case_row(title: Option<&str>, court: Option<&str>) -> CaseWithClient {
        CaseWithClient {
            case: cases::Model {
                id: 1,
                case_number: "CS-101/2026".to_string(),
                court_name: court.map(str::to_string),
                case_title: title.map(str::to_string),
                case_type: None,
                client_id: 1,
                opponent_name: None,
                opponent_advocate: None,
                filing_date: None,
                current_stage: None,
                next_hearing_date: NaiveDate::from_ymd_opt(2026, 8, 26),
                status: "Active".to_string(),
                notes: None,
                created_at: String::new(),
                updated_at: String::new(),
            },
            client: None,
        }
    }

    #[test]
    fn reminder_body_contains_case_details() {
        let body = compose_reminder(&case_row(Some("Doe v. Roe"), Some("District Court")));
        assert_eq!(
            body,
            "Reminder: You have a hearing tomorrow (2026-08-26) for case CS-101/2026: Doe v. Roe at District Court."
        );
    }

    #[test]
    fn reminder_body_defaults_missing_fields() {
        let body = compose_reminder(&case_row(None, None));
        assert!(body.contains("CS-101/2026"));
        assert!(body.contains("(untitled)"));
        assert!(body.contains("(court not recorded)"));
    }
}
