// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! AWS Systems Manager Parameter Store backend.
//!
//! ```text
//! SsmStore::from_env(&StoreConfig)
//!   aws_config defaults (env, shared config/credentials, SSO, IMDS)
//!   + region / endpoint / timeout overrides
//!        |
//!        v
//! get_page --> GetParametersByPath
//!                Path, NextToken, MaxResults,
//!                Recursive=false, WithDecryption=true
//! ```

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::config::Region;
use aws_sdk_ssm::config::timeout::TimeoutConfig;
use aws_sdk_ssm::error::DisplayErrorContext;
use tracing::debug;

use super::{PageQuery, Parameter, ParameterPage, ParameterStore};
use crate::config::types::StoreConfig;
use crate::error::StoreError;

/// Parameter store backed by `aws-sdk-ssm`.
#[derive(Debug, Clone)]
pub struct SsmStore {
    client: Client,
}

impl SsmStore {
    /// Loads the shared AWS configuration and builds a client from it.
    ///
    /// Credentials are resolved lazily, on the first request.
    pub async fn from_env(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;
        Self::new(&sdk_config, config)
    }

    /// Builds a client from an existing `SdkConfig` plus `[store]` overrides.
    #[must_use]
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &StoreConfig) -> Self {
        let mut builder = aws_sdk_ssm::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if let Some(timeout) = config.timeout() {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(timeout)
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        debug!(
            region = config.region.as_deref().unwrap_or("default"),
            endpoint = config.endpoint.as_deref().unwrap_or("default"),
            "parameter store client configured"
        );

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmStore {
    async fn get_page(&self, query: PageQuery<'_>) -> Result<ParameterPage, StoreError> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(query.path)
            .set_next_token(query.next_token.map(str::to_owned))
            .max_results(query.page_size)
            .recursive(false)
            .with_decryption(true)
            .send()
            .await
            .map_err(|err| StoreError::Request {
                path: query.path.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        let parameters = output
            .parameters()
            .iter()
            .map(|param| {
                let name = param.name().ok_or_else(|| StoreError::MalformedParameter {
                    path: query.path.to_string(),
                    field: "name",
                })?;
                let value = param.value().ok_or_else(|| StoreError::MalformedParameter {
                    path: query.path.to_string(),
                    field: "value",
                })?;
                Ok(Parameter::new(name, value))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(ParameterPage {
            parameters,
            next_token: output.next_token().map(str::to_owned),
        })
    }
}
