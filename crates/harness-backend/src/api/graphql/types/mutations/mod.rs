mod albums;
mod cards;
mod chats;
mod comments;
mod posts;
mod users;

pub use albums::*;
pub use cards::*;
pub use chats::*;
pub use comments::*;
pub use posts::*;
pub use users::*;
