use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::auth::value_objects::AccessToken;
use crate::domain::profile::{Profile, ProfileRepository};
use crate::infrastructure::gateway::SupabaseClient;

/// Reads the `profiles` table through PostgREST
pub struct SupabaseProfileRepository {
  client: SupabaseClient,
}

impl SupabaseProfileRepository {
  pub fn new(client: SupabaseClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
  async fn find_by_user_id(
    &self,
    user_id: Uuid,
    access_token: &AccessToken,
  ) -> Result<Option<Profile>, RepositoryError> {
    let id_filter = format!("eq.{}", user_id);
    let response = self
      .client
      .get("/rest/v1/profiles", Some(access_token))
      .query(&[
        ("id", id_filter.as_str()),
        ("select", "id,first_name,last_name,email,birthday"),
      ])
      .send()
      .await?;

    match response.status() {
      status if status.is_success() => {}
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(RepositoryError::Unauthorized),
      status => {
        return Err(RepositoryError::QueryFailed(format!(
          "profiles lookup returned {}",
          status
        )));
      }
    }

    let rows: Vec<Profile> = response.json().await?;
    Ok(rows.into_iter().next())
  }
}
