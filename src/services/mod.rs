pub mod reminder;

pub use reminder::{Dispatch, ReminderError, ReminderReport, ReminderService, SmsGateway};
