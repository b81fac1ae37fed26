#![allow(dead_code)]

pub mod user;
