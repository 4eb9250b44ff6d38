#![allow(clippy::needless_pass_by_value)]

pub mod import;
pub mod init;
pub mod post;
pub mod search;
pub mod status;
