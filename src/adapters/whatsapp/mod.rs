pub mod cloud_api;

pub use cloud_api::{CloudApiGateway, TemplateConfig};
