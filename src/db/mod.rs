pub mod models;
pub mod users;
pub mod sessions;
pub mod messages;

pub use models::{User, UserProfile, Session, Message};
pub use users::UserRepository;
pub use sessions::SessionRepository;
pub use messages::MessageRepository;
