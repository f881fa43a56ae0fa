//! Entity ↔ model mappers

mod answer;
mod question;
mod tag;
mod user;
mod vote;
