mod add;
mod edit;
mod import;
mod info;
mod list;
mod remove;

pub use add::cmd_add;
pub use edit::cmd_edit;
pub use import::cmd_import;
pub use info::cmd_info;
pub use list::cmd_list;
pub use remove::cmd_remove;
