pub mod homework;
pub mod notification;
pub mod poll_window;
