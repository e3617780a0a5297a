pub mod address;
pub mod contact;
pub mod user;

pub use address::{Address, AddressFields};
pub use contact::{Contact, ContactFields};
pub use user::{NewUser, User, UserChanges};
