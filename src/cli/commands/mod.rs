mod init;
mod list;
mod serve;
mod toggle;

pub use init::cmd_init_config;
pub use list::cmd_list;
pub use serve::cmd_serve;
pub use toggle::cmd_toggle;
