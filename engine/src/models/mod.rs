//! Domain types for the bean machine

pub mod bean;

pub use bean::{Bean, BeanSnapshot};
