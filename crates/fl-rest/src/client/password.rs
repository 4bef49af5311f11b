//! User password management.

use forcelink_client::{Document, Error, ErrorKind, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    fn password_path(&self, user_id: Option<&str>) -> Result<String> {
        let user_id = user_id
            .map(str::to_string)
            .or_else(|| self.session().user_id().map(str::to_string))
            .ok_or_else(|| {
                Error::new(ErrorKind::Config(
                    "user_id must be given or set on the session".to_string(),
                ))
            })?;
        Ok(format!("sobjects/User/{user_id}/password"))
    }

    /// Password status for a user (expired or not).
    pub async fn get_password_info(&self, user_id: Option<&str>) -> Result<Document> {
        let path = self.password_path(user_id)?;
        self.call(CallDescriptor::get(path)).await
    }

    /// Set a user's password.
    pub async fn set_password(&self, password: &str, user_id: Option<&str>) -> Result<Document> {
        let path = self.password_path(user_id)?;
        let descriptor = CallDescriptor::post(path)
            .json_body(&serde_json::json!({ "NewPassword": password }))?;
        self.call(descriptor).await
    }

    /// Reset a user's password to a server-generated value.
    pub async fn reset_password(&self, user_id: Option<&str>) -> Result<Document> {
        let path = self.password_path(user_id)?;
        self.call(CallDescriptor::delete(path)).await
    }
}
