//! Domain models
//!
//! Plain row structs and input types. All fields are scalars; related rows
//! are joined in the repository layer, never held as object graphs.

pub mod book;
pub mod fine;
pub mod history;
pub mod loan;
pub mod notification;
pub mod request;
pub mod user;
pub mod wishlist;
