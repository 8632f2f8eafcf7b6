// Pieces drawn around the record list: the status line, the optional log
// panel, toasts, and the width helpers they share.

pub mod formatters;
pub mod logs_panel;
pub mod status_bar;
pub mod toast;

pub use toast::Toast;
