//! Sidebar panel for controller-driven menus.
//!
//! A [`Sidebar`] docks to the left or right screen edge and lists
//! [`SidebarEntry`] rows: plain info rows, on/off toggles, callbacks and
//! selectors that open a list picker. D-pad and stick presses move the
//! focus, A activates the focused row and B closes the panel. The focused
//! row shows its info text in a panel beside the sidebar.

mod entry;
mod entry_array;
mod entry_bool;
mod entry_callback;
mod list;
mod marquee;
mod sidebar;

pub use entry::{EntryBase, EntryLayout, SidebarEntry, SidebarEntryInfo};
pub use entry_array::SidebarEntryArray;
pub use entry_bool::SidebarEntryBool;
pub use entry_callback::SidebarEntryCallback;
pub use list::{ListEvent, ListView};
pub use marquee::{MARQUEE_DWELL_FRAMES, MARQUEE_GAP, Marquee, ScrollingText};
pub use sidebar::{Side, Sidebar};
