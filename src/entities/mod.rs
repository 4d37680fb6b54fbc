pub mod prelude;

pub mod cases;
pub mod clients;
pub mod users;
