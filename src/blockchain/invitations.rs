//! Invitations to join a network

use crate::model::Invitation;
use crate::pagination::{Page, PageRequest};
use crate::service::{BlockchainApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct InvitationApi<A> {
    api: A,
}

impl<A: BlockchainApi> InvitationApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn list_invitations(&self) -> ServiceResult<Page<Invitation>> {
        self.api.list_invitations(PageRequest::default()).await
    }

    pub async fn reject_invitation(&self, invitation_id: &str) -> ServiceResult<()> {
        self.api.reject_invitation(invitation_id).await
    }
}
