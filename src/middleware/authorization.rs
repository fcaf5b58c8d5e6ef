use crate::configuration::AuthSettings;
use actix_casbin_auth::{
    casbin::{DefaultModel, FileAdapter, MgmtApi},
    CasbinService,
};
use std::io::{Error, ErrorKind};

/// Casbin enforcer over the model and policy files named in `auth`.
pub async fn try_new(auth: &AuthSettings) -> Result<CasbinService, Error> {
    let m = DefaultModel::from_file(auth.access_model.as_str())
        .await
        .map_err(|err| Error::new(ErrorKind::Other, format!("{err:?}")))?;
    let a = FileAdapter::new(auth.access_policy.clone());

    let casbin_service = CasbinService::new(m, a)
        .await
        .map_err(|err| Error::new(ErrorKind::Other, format!("{err:?}")))?;

    let rules = casbin_service.read().await.get_all_policy().len();
    tracing::info!(policy = %auth.access_policy, rules, "Access control loaded");

    Ok(casbin_service)
}
