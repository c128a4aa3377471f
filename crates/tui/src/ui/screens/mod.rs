pub mod groups;
pub mod payment_methods;
pub mod tags;
pub mod users;
