//! UI Components
//!
//! Reusable Leptos components.

mod collection_view;
mod drop_zone;
mod entry_card;
mod ranking_list;
mod save_bar;
mod tier_list;
mod toast_host;

pub use collection_view::CollectionView;
pub use drop_zone::DropZone;
pub use entry_card::EntryCard;
pub use ranking_list::RankingList;
pub use save_bar::SaveBar;
pub use tier_list::TierList;
pub use toast_host::ToastHost;
