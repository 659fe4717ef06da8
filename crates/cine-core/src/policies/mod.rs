//! Domain policies - pure rules shared by the service layer

mod ownership;
mod ranking;
mod thumbnail;

pub use ownership::{Actor, OwnedResource};
pub use ranking::{Rankable, RankedComments, RankingPolicy};
pub use thumbnail::resolve_thumbnail;
