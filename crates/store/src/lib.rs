pub use error::StoreError;
pub use expenses::Expense;
pub use groups::Group;
pub use money::Money;
pub use ops::{Store, StoreBuilder};
pub use payment_methods::PaymentMethod;
pub use tags::Tag;
pub use users::User;

mod error;
mod expense_tags;
mod expenses;
mod groups;
mod money;
mod ops;
mod payment_methods;
mod tags;
mod users;

pub type ResultStore<T> = Result<T, StoreError>;
