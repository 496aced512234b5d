pub mod party;
pub mod play_next;

pub use party::{PartyEntry, PartyQueue};
pub use play_next::PlayNextQueue;
