use anyhow::Result;
use chrono::Local;

use crate::config::Config;
use crate::services::{Dispatch, ReminderError};
use crate::state::SharedState;

/// One-shot reminder run for hearings due tomorrow. Prints human-readable
/// status lines; configuration problems abort the run but still exit 0 so an
/// external scheduler does not flap.
pub async fn run(config: Config) -> Result<()> {
    let state = SharedState::new(config).await?;
    let service = state.reminder_service();

    let today = Local::now().date_naive();

    let report = match service.run(today).await {
        Ok(report) => report,
        Err(ReminderError::ConfigurationMissing) => {
            println!(
                "Twilio configuration missing. Please set TWILIO_SID, TWILIO_AUTH_TOKEN, and TWILIO_FROM_NUMBER."
            );
            return Ok(());
        }
        Err(ReminderError::Database(e)) => return Err(e),
    };

    if report.dispatches.is_empty() {
        println!("No hearings found for tomorrow.");
        return Ok(());
    }

    for dispatch in &report.dispatches {
        match dispatch {
            Dispatch::Sent {
                client_name,
                phone_number,
                message_id,
                ..
            } => {
                println!("Sent SMS to {client_name} ({phone_number}): {message_id}");
            }
            Dispatch::SkippedNoPhone { case_number } => {
                println!("Skipping case {case_number}: Client phone number missing.");
            }
            Dispatch::Failed {
                client_name, error, ..
            } => {
                println!("Failed to send SMS to {client_name}: {error}");
            }
        }
    }

    println!();
    println!(
        "Done. {} sent, {} skipped, {} failed.",
        report.sent(),
        report.skipped(),
        report.failed()
    );

    Ok(())
}
