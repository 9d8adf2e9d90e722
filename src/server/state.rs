use crate::poi::DiscoverClient;

pub struct AppState {
    pub discover: DiscoverClient,
}
