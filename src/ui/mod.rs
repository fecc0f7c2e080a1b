//! Mobile UI controllers. Each one owns a disjoint part of the page and
//! gives up silently when its markup is missing.

pub mod menu;
pub mod tabs;

pub use menu::{MenuClick, MobileMenu, ACTION_CLOSE_DELAY_MS};
pub use tabs::{MobileTabs, HOME_TAB, TAB_BREAKPOINT};
