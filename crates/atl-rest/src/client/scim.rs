use atl_client::{IndexedPage, PageIdiom, Requirements};
use futures::stream::BoxStream;
use tracing::instrument;

use super::{segment, Listing};
use crate::scim::{ScimGroup, ScimUser};
use crate::Result;

impl super::AtlassianRestClient {
    /// Users provisioned in a directory.
    #[instrument(skip(self))]
    pub fn scim_users(&self, directory_id: &str) -> Result<Listing<ScimUser>> {
        Requirements::new()
            .field("directoryId", directory_id)
            .check()?;
        Ok(self.client.paginate::<_, IndexedPage<_>>(
            self.client.scim_url(directory_id.trim(), "Users"),
            vec![],
            PageIdiom::IndexedTotal,
        ))
    }

    /// Users provisioned in a directory, with up to `workers` pages fetched
    /// at once. Users arrive in directory order.
    #[instrument(skip(self))]
    pub fn scim_users_bulk(
        &self,
        directory_id: &str,
        workers: usize,
    ) -> Result<BoxStream<'static, Result<ScimUser>>> {
        Ok(self.scim_users(directory_id)?.bulk(workers))
    }

    /// [`scim_users_bulk`](Self::scim_users_bulk) with the client's
    /// configured number of workers.
    #[instrument(skip(self))]
    pub fn scim_users_concurrent(
        &self,
        directory_id: &str,
    ) -> Result<BoxStream<'static, Result<ScimUser>>> {
        self.scim_users_bulk(directory_id, self.client.config().bulk_workers)
    }

    /// Get one provisioned user.
    #[instrument(skip(self))]
    pub async fn get_scim_user(&self, directory_id: &str, user_id: &str) -> Result<ScimUser> {
        Requirements::new()
            .field("directoryId", directory_id)
            .field("userId", user_id)
            .check()?;
        let url = self
            .client
            .scim_url(directory_id.trim(), &format!("Users/{}", segment(user_id)));
        let request = self.client.get(&url).scim();
        self.client.execute(request).await?.decode()
    }

    /// Deactivate and remove a provisioned user.
    #[instrument(skip(self))]
    pub async fn delete_scim_user(&self, directory_id: &str, user_id: &str) -> Result<()> {
        Requirements::new()
            .field("directoryId", directory_id)
            .field("userId", user_id)
            .check()?;
        let url = self
            .client
            .scim_url(directory_id.trim(), &format!("Users/{}", segment(user_id)));
        let request = self.client.delete(&url).scim();
        self.client.execute(request).await?.error_for_status()?;
        Ok(())
    }

    /// Groups provisioned in a directory.
    #[instrument(skip(self))]
    pub fn scim_groups(&self, directory_id: &str) -> Result<Listing<ScimGroup>> {
        Requirements::new()
            .field("directoryId", directory_id)
            .check()?;
        Ok(self.client.paginate::<_, IndexedPage<_>>(
            self.client.scim_url(directory_id.trim(), "Groups"),
            vec![],
            PageIdiom::IndexedTotal,
        ))
    }
}
