//! Session model -> entity mapper

use roster_core::{Session, SessionId, UserId};

use crate::models::SessionModel;

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            id: SessionId::new(model.id),
            user_id: UserId::new(model.user_id),
            device_id: model.device_id,
            device_location: model.device_location,
            token: model.token,
            login_time: model.login_time,
            is_active: model.is_active,
        }
    }
}
