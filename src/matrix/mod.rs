// Matrix data structures and operations

pub mod config;
pub mod coo;
pub mod dense;
pub mod index;
pub mod reference;

pub use config::{Backend, ExpansionStrategy, SpgemmConfig, SystemParameters};
pub use coo::SparseMatrixCOO;
pub use dense::multiply_dense;
pub use index::IndexType;
pub use reference::reference_spgemm;
