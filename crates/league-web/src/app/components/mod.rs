pub mod layout;
pub mod navbar;
pub mod toast;

pub use layout::{Layout, Loading};
pub use navbar::NavBar;
pub use toast::{Toast, ToastMessage, ToastType};
