// response middleware

pub mod security;
