pub use super::game::Entity as Game;
pub use super::list_entry::Entity as ListEntry;
pub use super::platform::Entity as Platform;
pub use super::session::Entity as Session;
pub use super::user::Entity as User;
pub use super::user_platform::Entity as UserPlatform;
