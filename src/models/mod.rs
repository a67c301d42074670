pub mod ack;
pub mod document;
pub mod movie;
pub mod user;

pub use ack::*;
pub use document::*;
pub use movie::*;
pub use user::*;
