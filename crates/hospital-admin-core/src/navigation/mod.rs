//! Navigation: destinations, the session-guarded router, the quick-navigation
//! palette, and the sidebar.

mod destination;
mod palette;
mod router;
mod sidebar;

pub use destination::*;
pub use palette::*;
pub use router::*;
pub use sidebar::*;
