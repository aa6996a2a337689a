pub mod image;
pub mod multipart;
pub mod password;
pub mod validation;
