pub mod send_reminders;
pub mod serve;
