pub mod http;
pub mod mock;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> BackendBox {
        match name {
            BackendName::Http => return Box::<http::HttpBackend>::default(),
            BackendName::Mock => return Box::<mock::MockBackend>::default(),
        }
    }
}
