use chrono::{Duration, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Session, SessionCreate};

impl Entity for Session {
    type Id = String;
    type CreatePayload = SessionCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.token
    }

    fn from_create(token: String, payload: SessionCreate) -> Result<Self, String> {
        if payload.ttl_secs <= 0 {
            return Err("Session TTL must be positive".to_string());
        }
        Ok(Self {
            token,
            user_id: payload.user_id,
            role: payload.role,
            expires_at: Utc::now() + Duration::seconds(payload.ttl_secs),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
