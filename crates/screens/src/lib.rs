//! Screen controllers.
//!
//! Each screen owns its state (loaded lists, the pending order or form) and
//! reports outcomes through a `Notifier` instead of failing loudly. Rendering
//! is left to whatever front end drives them.

pub mod error;
pub mod notice;
pub mod order_screen;
pub mod record_screen;

pub use error::FormError;
pub use notice::{LogNotifier, Notice, NoticeLevel, NoticeLog, Notifier};
pub use order_screen::OrderScreen;
pub use record_screen::{FormMode, RecordScreen};
