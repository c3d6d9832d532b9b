pub mod outline;

pub use outline::BlogOutline;
