pub mod dialog_box;
pub mod lang_toggle;
pub mod modal;
pub mod portrait;
pub mod summary_panel;
pub mod transition_banner;

pub use dialog_box::DialogBox;
pub use lang_toggle::LangToggle;
pub use modal::Modal;
pub use portrait::Portrait;
pub use summary_panel::SummaryPanel;
pub use transition_banner::TransitionBanner;
