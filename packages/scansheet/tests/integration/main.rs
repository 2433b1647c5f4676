mod common;

mod admin;
