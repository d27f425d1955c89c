use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        request::UpdateAddressesRequest,
        response::{ApiResponse, ErrorResponse, site::SiteResponse},
    },
    model::site::Site,
    utils::AppError,
};

pub type DynSiteRepository = Arc<dyn SiteRepositoryTrait + Send + Sync>;
pub type DynSiteService = Arc<dyn SiteServiceTrait + Send + Sync>;

#[async_trait]
pub trait SiteRepositoryTrait {
    async fn find_first(&self) -> Result<Option<Site>, AppError>;
    async fn create(&self, input: &UpdateAddressesRequest) -> Result<Site, AppError>;
    async fn update(&self, site_id: i32, input: &UpdateAddressesRequest) -> Result<Site, AppError>;
}

#[async_trait]
pub trait SiteServiceTrait {
    async fn get_site(&self) -> Result<ApiResponse<SiteResponse>, ErrorResponse>;
    async fn update_addresses(
        &self,
        input: &UpdateAddressesRequest,
    ) -> Result<ApiResponse<SiteResponse>, ErrorResponse>;
}
