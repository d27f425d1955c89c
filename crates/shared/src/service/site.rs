use crate::{
    abstract_trait::{DynSiteRepository, SiteServiceTrait},
    domain::{
        request::{UpdateAddressesRequest, keep_unless_blank},
        response::{ApiResponse, ErrorResponse, site::SiteResponse},
    },
    utils::{AppError, Method, OperationTracer, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::error;

#[derive(Clone)]
pub struct SiteService {
    repository: DynSiteRepository,
    tracer: OperationTracer,
}

impl std::fmt::Debug for SiteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteService")
            .field("repository", &"DynSiteRepository")
            .finish()
    }
}

impl SiteService {
    pub fn new(repository: DynSiteRepository, registry: &mut Registry) -> Self {
        Self {
            repository,
            tracer: OperationTracer::register("site_service", registry),
        }
    }

    async fn fail<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        err: AppError,
    ) -> Result<T, ErrorResponse> {
        let msg = err.to_string();
        error!("{msg}");
        self.tracer
            .complete_tracing_error(tracing_ctx, method, &msg)
            .await;
        Err(ErrorResponse::from(err))
    }
}

#[async_trait]
impl SiteServiceTrait for SiteService {
    async fn get_site(&self) -> Result<ApiResponse<SiteResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start_tracing("GetSite", vec![KeyValue::new("component", "site")]);

        match self.repository.find_first().await {
            Ok(site) => {
                let data = site.map(SiteResponse::from).unwrap_or_default();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Site retrieved")
                    .await;

                Ok(ApiResponse::success("Site retrieved successfully", data))
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }

    async fn update_addresses(
        &self,
        input: &UpdateAddressesRequest,
    ) -> Result<ApiResponse<SiteResponse>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateAddresses",
            vec![KeyValue::new("component", "site")],
        );

        let current = match self.repository.find_first().await {
            Ok(current) => current,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        let result = match current {
            Some(site) => {
                let merged = UpdateAddressesRequest {
                    bitcoin_address: keep_unless_blank(
                        &input.bitcoin_address,
                        &site.bitcoin_address,
                    ),
                    bch_address: keep_unless_blank(&input.bch_address, &site.bch_address),
                    ethereum_address: keep_unless_blank(
                        &input.ethereum_address,
                        &site.ethereum_address,
                    ),
                    usdt_address: keep_unless_blank(&input.usdt_address, &site.usdt_address),
                    whatsapp_number: keep_unless_blank(
                        &input.whatsapp_number,
                        &site.whatsapp_number,
                    ),
                };
                self.repository.update(site.site_id, &merged).await
            }
            None => {
                let fresh = UpdateAddressesRequest {
                    bitcoin_address: keep_unless_blank(&input.bitcoin_address, &None),
                    bch_address: keep_unless_blank(&input.bch_address, &None),
                    ethereum_address: keep_unless_blank(&input.ethereum_address, &None),
                    usdt_address: keep_unless_blank(&input.usdt_address, &None),
                    whatsapp_number: keep_unless_blank(&input.whatsapp_number, &None),
                };
                self.repository.create(&fresh).await
            }
        };

        match result {
            Ok(site) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Addresses updated")
                    .await;

                Ok(ApiResponse::success(
                    "Addresses updated successfully",
                    SiteResponse::from(site),
                ))
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }
}
