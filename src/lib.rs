pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod entities;
pub mod middleware;
