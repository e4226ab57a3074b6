pub mod area_of_interest;
pub mod session;

pub use session::{SessionContext, SessionService};
