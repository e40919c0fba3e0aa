pub mod etl;
pub mod report;
pub mod store;

pub use crate::domain::directory::Directory;
pub use crate::domain::model::{ConnectionParams, Post};
pub use crate::domain::ports::{ConfigProvider, LineStore, Pipeline};
pub use crate::utils::error::Result;
