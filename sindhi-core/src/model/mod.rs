pub mod history;
pub mod notification;
pub mod request;
