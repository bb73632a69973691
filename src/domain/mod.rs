// Domain module.
// Record types, mock data, collection stores, and message dispatch.

pub mod dispatch;
pub mod seed;
pub mod store;
pub mod types;

pub use dispatch::{Dispatcher, InviteRequest, InviteTemplates, Outbox, ReminderRequest};
pub use seed::SeedData;
pub use store::{CollectionStore, Entity};
pub use types::*;
