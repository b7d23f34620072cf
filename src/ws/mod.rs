pub mod handler;
pub mod msg_commit_handler;
pub mod msg_edit_handler;
pub mod msg_join_handler;
pub mod registry;
