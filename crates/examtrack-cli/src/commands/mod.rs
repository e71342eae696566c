pub mod history;
pub mod init;
pub mod stats;
pub mod submit;
pub mod validate;
