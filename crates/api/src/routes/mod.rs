//! Route groups. Mounting, deadlines and middleware live in
//! [`crate::router`].

pub mod health;
pub mod provider;
pub mod takeone;
