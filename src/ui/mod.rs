pub mod like_view;
pub mod main_window;
pub mod message_list;
