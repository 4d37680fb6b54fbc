pub use super::cases::Entity as Cases;
pub use super::clients::Entity as Clients;
pub use super::users::Entity as Users;
