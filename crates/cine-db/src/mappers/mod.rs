//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.
//! Rows carrying a rating go through `TryFrom` since the stored value is
//! re-validated on the way out.

mod board;
mod movie;
mod review;
mod user;
