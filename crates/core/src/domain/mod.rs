pub mod context;
pub mod customer;
pub mod product;
pub mod result;
pub mod rule;
pub mod scope;
pub mod tiered;
pub mod volume;
