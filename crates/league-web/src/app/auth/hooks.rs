use dioxus::prelude::*;
use league_types::SessionSnapshot;

use super::context::Notice;
use crate::app::services::AppServices;

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

/// Current session snapshot from context
pub fn use_session() -> Signal<SessionSnapshot> {
    use_context::<Signal<SessionSnapshot>>()
}

pub fn use_notice() -> Signal<Option<String>> {
    use_context::<Notice>().0
}

